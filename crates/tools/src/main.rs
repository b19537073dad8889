use anyhow::{Context, Result};
use clap::Parser;
use sim::{Button, Game, Mode, ScriptedHost, SimConfig, TickOutcome, layout};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Plays a scripted button sequence against an ASCII layout and prints every event.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the ASCII layout file
    #[arg(short, long)]
    layout: PathBuf,
    /// Path to a JSON array of buttons
    #[arg(short, long)]
    script: PathBuf,
    /// Optional TOML config; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Upper bound on ticks before giving up
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,
    /// Print the final board
    #[arg(long)]
    render: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SimConfig::default(),
    };
    let layout_text = fs::read_to_string(&args.layout)
        .with_context(|| format!("Failed to read layout file: {}", args.layout.display()))?;
    let world = layout::parse(&layout_text).context("Failed to parse layout")?;
    let script_text = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script file: {}", args.script.display()))?;
    let buttons: Vec<Button> =
        serde_json::from_str(&script_text).context("Failed to deserialize script JSON")?;

    let mut game = Game::new(config, world).context("Failed to start session")?;
    let mut host = ScriptedHost::new(buttons);
    let mut printed = 0;

    while game.current_tick() < args.max_ticks {
        let outcome = game.tick(&mut host).context("Tick failed")?;
        for event in &host.events[printed..] {
            println!("{}", serde_json::to_string(event)?);
        }
        printed = host.events.len();
        // Scripts have no menu to drive, so a Cancel just closes it again.
        if outcome == TickOutcome::Suspended {
            game.set_mode(Mode::Explore);
        }
        if outcome == TickOutcome::Idle && host.buttons.is_empty() {
            break;
        }
    }

    println!("Script complete.");
    println!("Final Tick: {}", game.current_tick());
    println!("Depth: {}", game.world().depth);
    println!("Snapshot Hash: {}", game.snapshot_hash());
    if args.render {
        print!("{}", layout::render(game.world()));
    }

    Ok(())
}
