use std::fs;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use delve_core::{InputJournal, ReplayResult, replay_to_end};
use delve_core::journal_file::load_journal_from_file;
use log::info;

#[derive(Parser)]
#[command(author, version, about = "Replays a recorded action journal", long_about = None)]
struct Args {
    /// Path to the journal to replay (`.json` journal or `.jsonl` hash-chained journal file)
    #[arg(short, long)]
    journal: String,
}

fn load(path: &str) -> Result<InputJournal> {
    if path.ends_with(".jsonl") {
        let loaded = load_journal_from_file(path.as_ref())
            .with_context(|| format!("Failed to load journal file: {path}"))?;
        return Ok(loaded.journal);
    }
    let journal_data =
        fs::read_to_string(path).with_context(|| format!("Failed to read journal file: {path}"))?;
    InputJournal::from_json(&journal_data).with_context(|| "Failed to deserialize journal JSON")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let journal = load(&args.journal)?;
    info!("replaying {} actions from seed {}", journal.inputs.len(), journal.seed);

    let result: ReplayResult =
        replay_to_end(&journal).map_err(|e| anyhow!("Replay failed during execution: {e:?}"))?;

    println!("Replay complete.");
    println!("Final Turn: {}", result.final_turn);
    println!("Outcome: {:?}", result.outcome);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
