//! Local table driver: plays a game over stdin/stdout.
//!
//! Each input line is `<PLAYER_ID> <text>`. Every notification is printed as
//! `[<PLAYER_ID>] <text>`, so one terminal can play every seat.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parking_lot::Mutex;
use resistance::{Lobby, Notifier, PlayerId, TableConfig};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "resistance-table")]
#[command(about = "Play a hidden-role mission game from a single terminal")]
struct Args {
    /// Seed for deterministic seating and spy selection
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds a first "end" waits for the confirming second "end"
    #[arg(long)]
    end_confirm_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Writes every notification to stdout, one block per message.
struct StdoutNotifier {
    out: Mutex<io::Stdout>,
}

impl Notifier for StdoutNotifier {
    fn notify(&self, to: &PlayerId, message: &str) {
        let mut out = self.out.lock();
        for line in message.lines() {
            if let Err(err) = writeln!(out, "[{to}] {line}") {
                warn!(error = %err, "Failed to write notification");
                return;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = TableConfig::from_env()?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(secs) = args.end_confirm_secs {
        config.end_confirm_window = Duration::from_secs(secs);
    }
    debug!(?config, "Table configured");

    let notifier = Arc::new(StdoutNotifier {
        out: Mutex::new(io::stdout()),
    });
    let lobby = Lobby::new(notifier, config);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some((raw_id, text)) = line.trim_start().split_once(char::is_whitespace) else {
            if !line.trim().is_empty() {
                eprintln!("expected: <PLAYER_ID> <text>");
            }
            continue;
        };
        match PlayerId::parse(raw_id) {
            Ok(sender) => lobby.handle_message(&sender, text),
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}
