//! Batch-edit sprite import settings across a filtered set of PNG assets.
//!
//! [`filter::select`] scans a folder for candidates and keeps the ones the
//! active [`filter::FilterMode`] accepts; [`import::SpriteImporter`] writes
//! the border and pivot settings for each of them.

pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod import;
pub mod lister;
