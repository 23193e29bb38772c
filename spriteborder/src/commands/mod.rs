pub mod args;
pub mod batch;
pub mod command_handler;
