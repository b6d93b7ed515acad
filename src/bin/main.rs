//! CLI wrapper for the VRAM probe
//!
//! The default invocation prints the `USED;TOTAL;UTIL` status line as the
//! first (and only) line of stdout, which is the contract the supervising
//! application reads. `--table` appends the human-readable block; `--format
//! json` dumps the whole snapshot instead.

use clap::Parser;
use vramprobe::{system_probe, Severity};

#[derive(Parser)]
#[command(name = "vramprobe")]
#[command(about = "One-shot GPU VRAM and utilization probe", long_about = None)]
#[command(version)]
struct Cli {
    /// Print the human-readable table after the status line
    #[arg(short, long)]
    table: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Echo diagnostic notes on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let snapshot = system_probe().snapshot();

    if cli.format == "json" {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to serialize snapshot: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{}", snapshot.status_line());

    if cli.table {
        print!("{}", snapshot.table());
    }

    if cli.verbose {
        for note in snapshot
            .memory
            .notes
            .iter()
            .chain(snapshot.utilization.notes.iter())
        {
            let label = match note.severity {
                Severity::Info => "info",
                Severity::Warning => "warning",
                Severity::Critical => "critical",
            };
            eprintln!("[{}] {}", label, note.message);
        }
    }
}
