use anyhow::{Result, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use sim::{
    Button, Cell, Direction, Game, Mode, ScriptedHost, SimConfig, TickOutcome, Turn, layout,
};
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const ARENA: &str = "\
################
#@.....#.....g.#
#......+.......#
#..g...#...##..#
#####'##...##..#
#......>...g...#
#.g............#
################";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_button(rng: &mut ChaCha8Rng) -> Button {
    let dir = choose(rng, &Direction::ALL);
    // Bias towards plain steps so runs and menus stay occasional.
    match rng.next_u64() % 16 {
        0 => Button::Cancel,
        1..=2 => Button::Run(dir),
        3..=5 => Button::Confirm,
        _ => Button::Direction(dir),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} ticks...", args.seed, args.ticks);
    let config = SimConfig { seed: args.seed, ..SimConfig::default() };
    let mut game = Game::new(config, layout::parse(ARENA)?)?;
    let mut host = ScriptedHost::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for step in 0..args.ticks {
        if game.turn() == Turn::Player && host.buttons.is_empty() && !game.is_running() {
            host.push(random_button(&mut rng));
        }
        let outcome = game.tick(&mut host)?;
        match outcome {
            TickOutcome::Suspended => game.set_mode(Mode::Explore),
            TickOutcome::PlayerTurnResumed => {
                info!(step, tick = game.current_tick(), hash = game.snapshot_hash(), "round")
            }
            _ => {}
        }

        // Assert invariants
        let world = game.world();
        if outcome == TickOutcome::PlayerActed {
            ensure!(
                world.actions.is_empty(),
                "Invariant failed: action left pending after player turn"
            );
        }
        for id in world.entities() {
            if let Some(health) = world.healths.get(id) {
                ensure!(health.current >= 0, "Invariant failed: negative health on {id:?}");
                ensure!(health.current <= health.max, "Invariant failed: HP > Max HP on {id:?}");
            }
            if let Some(pos) = world.position(id)
                && world.healths.contains_key(id)
            {
                let cell = world.dungeon.cell_at(pos);
                ensure!(
                    matches!(cell, Cell::Floor | Cell::Door),
                    "Invariant failed: creature {id:?} inside {cell:?} at {pos:?}"
                );
                let others = world
                    .placed()
                    .filter(|(other, at)| {
                        *other != id && *at == pos && world.healths.contains_key(*other)
                    })
                    .count();
                ensure!(others == 0, "Invariant failed: creatures stacked at {pos:?}");
            }
        }
        if let Turn::Npc { index, .. } = game.turn() {
            ensure!(index <= game.roster().len(), "Invariant failed: roster index out of range");
        }
        if world.dead.contains_key(world.player) {
            warn!(step, "player died");
            break;
        }
    }

    println!("Fuzzing completed successfully.");
    println!("Final Tick: {}", game.current_tick());
    println!("Snapshot Hash: {}", game.snapshot_hash());
    Ok(())
}
