use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use focusflow::cli::commands;
use focusflow::config::{ColorSetting, Config};
use focusflow::storage::Database;
use focusflow::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Completions { shell } => commands::completions(shell),
        command => {
            let db = Database::open()?;
            match command {
                Commands::Add(args) => commands::quick_add(&db, args, format)?,
                Commands::Task(args) => commands::task(&db, args.command, format)?,
                Commands::Project(args) => commands::project(&db, args.command, format)?,
                Commands::Focus(args) => commands::focus(&db, args.command, format)?,
                Commands::Reminder(args) => commands::reminder(&db, args.command, format)?,
                Commands::Stats(args) => commands::stats(&db, args.command, format)?,
                Commands::Finance(args) => commands::finance(&db, args.command, format)?,
                Commands::Backup(args) => commands::backup(&db, args.command)?,
                Commands::Settings(args) => commands::settings(&db, args.command, format)?,
                Commands::Completions { .. } => String::new(),
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
