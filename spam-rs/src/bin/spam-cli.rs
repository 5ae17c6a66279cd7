//! Terminal front-end for the spam classifier
//!
//! # Usage
//!
//! ```bash
//! # Dataset preview and model performance
//! spam-cli report
//!
//! # Classify a single message
//! spam-cli classify "WINNER!! Claim your free prize now"
//!
//! # Classify messages typed line by line
//! spam-cli shell
//! ```

use clap::{Parser, Subcommand};
use spam_rs::config::Config;
use spam_rs::logging;
use spam_rs::pipeline::TrainedPipeline;
use spam_rs::shell::{Shell, ShellResponse};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "spam-cli")]
#[command(about = "Train the spam classifier and classify messages", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Dataset CSV path, overrides the configuration
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Fail on malformed rows and unknown labels
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset preview and model performance
    Report,
    /// Classify one message
    Classify {
        /// Message text
        text: String,
    },
    /// Read messages from stdin, one per line
    Shell,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(dataset) = cli.dataset {
        config.dataset.path = dataset;
    }
    if cli.strict {
        config.dataset.strict = true;
    }

    logging::init(&config.logging)?;

    let pipeline = match TrainedPipeline::build(&config.dataset, &config.model) {
        Ok(pipeline) => Arc::new(pipeline),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let shell = Shell::new(pipeline, config.dataset.preview_rows);

    match cli.command {
        Commands::Report => {
            print!("{}", shell.render_overview());
        }
        Commands::Classify { text } => {
            let response = shell.submit(&text);
            print_response(&response);
            if matches!(response, ShellResponse::Warning(_)) {
                std::process::exit(2);
            }
        }
        Commands::Shell => {
            print!("{}", shell.render_overview());
            println!();
            println!("Enter email text (one message per line, Ctrl+D to quit):");

            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            write!(stdout, "> ")?;
            stdout.flush()?;

            for line in stdin.lock().lines() {
                let line = line?;
                print_response(&shell.submit(&line));
                write!(stdout, "> ")?;
                stdout.flush()?;
            }
            println!();
        }
    }

    Ok(())
}

fn print_response(response: &ShellResponse) {
    match response {
        ShellResponse::Warning(_) => println!("⚠ {}", response.message()),
        ShellResponse::Verdict(prediction) => println!(
            "{} (spam probability {:.2})",
            response.message(),
            prediction.spam_probability
        ),
    }
}
