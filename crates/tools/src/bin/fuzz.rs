use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use delve_core::{Action, Difficulty, InputJournal, RunState, chebyshev};
use log::{debug, info};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u32,
    /// Seed for the random action stream; defaults to the run seed
    #[arg(long)]
    action_seed: Option<u64>,
    #[arg(short, long, default_value_t = 2000)]
    turns: u32,
    /// TOML file with difficulty multipliers
    #[arg(long)]
    difficulty: Option<PathBuf>,
    /// Write the accepted actions as a replayable JSON journal
    #[arg(long)]
    journal_out: Option<PathBuf>,
}

const MOVES: [(i32, i32); 8] = [(0, -1), (1, 0), (0, 1), (-1, 0), (1, -1), (1, 1), (-1, 1), (-1, -1)];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

/// Mostly wanders, sometimes heads for the trapdoor so deeper floors get exercised.
fn next_action(state: &mut RunState, rng: &mut ChaCha8Rng) -> Option<Action> {
    match rng.next_u32() % 12 {
        0 => Some(Action::Wait),
        1 => Some(Action::Interact),
        2 => Some(Action::UseItem { slot: choose(rng, &[0, 1, 2]) }),
        3 => {
            let trapdoor = state.floor.trapdoor?;
            state.plan_auto_walk(trapdoor);
            None
        }
        _ => {
            let (dx, dy) = choose(rng, &MOVES);
            Some(Action::Move { dx, dy })
        }
    }
}

fn check_invariants(state: &RunState) -> Result<()> {
    let player = &state.player;
    if player.hp > player.max_hp {
        bail!("Invariant failed: HP > Max HP at turn {}", state.turn);
    }
    if !state.is_over() && !state.floor.is_walkable(player.pos) {
        bail!("Invariant failed: player inside wall at {:?}", player.pos);
    }
    for enemy in state.floor.enemies.values() {
        if !state.floor.is_walkable_for_enemy(enemy.pos) {
            bail!("Invariant failed: {} inside wall at {:?}", enemy.name, enemy.pos);
        }
        if chebyshev(enemy.pos, player.pos) == 0 {
            bail!("Invariant failed: {} stacked on the player", enemy.name);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let difficulty = match &args.difficulty {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read difficulty file: {}", path.display()))?;
            Difficulty::from_toml_str(&source).with_context(|| "Failed to parse difficulty TOML")?
        }
        None => Difficulty::normal(),
    };

    println!("Starting fuzz harness on seed {} for max {} turns...", args.seed, args.turns);
    let mut state = RunState::new(args.seed, difficulty.clone());
    let mut journal = InputJournal::new(args.seed, difficulty);
    let mut rng = ChaCha8Rng::seed_from_u64(args.action_seed.unwrap_or(u64::from(args.seed)));

    let mut attempts = 0;
    while state.turn < u64::from(args.turns) && attempts < args.turns * 4 {
        attempts += 1;
        let (action, report) = match state.auto_walk.front().copied() {
            Some(direction) => (Action::step(direction), state.auto_walk_tick()),
            None => match next_action(&mut state, &mut rng) {
                Some(action) => (action, Some(state.step(action))),
                None => continue,
            },
        };
        let Some(report) = report else {
            continue;
        };
        if report.accepted {
            journal.append(action);
        }
        check_invariants(&state)?;
        if report.game_over {
            println!("Finished with outcome {:?} after {} turns", state.outcome, state.turn);
            break;
        }
    }
    debug!("fuzz finished after {attempts} attempts");
    info!("reached floor {} with score {}", state.floor.number, state.player.score);

    if let Some(path) = &args.journal_out {
        let json = journal.to_json().with_context(|| "Failed to serialize journal")?;
        fs::write(path, json).with_context(|| format!("Failed to write journal: {}", path.display()))?;
        println!("Journal written to {}", path.display());
    }

    let snapshot = state.snapshot_hash().with_context(|| "Failed to hash final state")?;
    println!("Fuzzing completed successfully (snapshot {snapshot}).");
    Ok(())
}
