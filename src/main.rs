use anyhow::{Context, Result};
use clap::Parser;
use folio_calc::calculator::CalculatorSnapshot;
use folio_calc::config::Config;
use folio_calc::session::Session;
use folio_calc::ui::{RenderOptions, render_calculator};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio-calc", version)]
#[command(about = "Four-function calculator driven by typed keystrokes")]
struct Cli {
    /// Keystrokes to feed, e.g. "5 + 3 × 2 =". Reads stdin line by line when omitted.
    keys: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print snapshots as JSON
    #[arg(long)]
    json: bool,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Do not print calculation history
    #[arg(long)]
    no_history: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let mut options = RenderOptions::from(&config.display);
    if cli.no_history {
        options.show_history = false;
    }

    let mut session = Session::new(&config);
    match cli.keys {
        Some(ref keys) => {
            let snapshot = session.feed(keys)?;
            print_snapshot(&snapshot, &options, cli.json)?;
        }
        None => run_interactive(&mut session, &options, cli.json)?,
    }

    if cli.copy {
        session.copy_display();
    }

    Ok(())
}

fn run_interactive(session: &mut Session, options: &RenderOptions, json: bool) -> Result<()> {
    info!("Interactive mode, type keys and press enter ('quit' to exit)");
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        match session.feed(trimmed) {
            Ok(snapshot) => print_snapshot(&snapshot, options, json)?,
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &CalculatorSnapshot, options: &RenderOptions, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        let snapshot = snapshot.clone().truncate_history(if options.show_history {
            options.history_limit
        } else {
            0
        });
        serde_json::to_writer(&mut stdout, &snapshot)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", render_calculator(snapshot, options))?;
    }
    Ok(())
}
