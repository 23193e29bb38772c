use spriteborder::commands::args::Args;
use spriteborder::commands::command_handler::handle_command;
use spriteborder::config::Config;
use spriteborder::error::{Result, SpriteError};

fn main() {
    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse()?;
    if args.no_color {
        colored::control::set_override(false);
    }
    setup_logging(args.verbose, !args.no_color && atty::is(atty::Stream::Stderr));

    let mut config = Config::load(&Config::get_config_path())?;
    handle_command(args, &mut config)
}

fn setup_logging(verbose: u64, ansi: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .init();
}

fn print_error(error: &SpriteError) {
    use colored::Colorize;

    let error_type = match error {
        SpriteError::Io(_) => "IO Error",
        SpriteError::Parse(_) => "Parse Error",
        SpriteError::Config(_) => "Config Error",
        SpriteError::Scan { .. } => "Scan Error",
        SpriteError::Import { .. } => "Import Error",
        SpriteError::Other(_) => "Error",
    };

    eprintln!();
    eprintln!("{} {}", "✗".bright_red(), error_type.bright_red().bold());
    eprintln!();

    let message = error.to_string();
    for line in message.lines() {
        eprintln!("  {}", line);
    }
    eprintln!();
}
