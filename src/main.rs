// Terminal Sokoban shell around the game engine.
// Controls: W/A/S/D or arrow keys, R to restart, Q to quit.
// Modes: `interactive [level]` (default) or `replay <level> <moves>` with moves spelled as U/D/L/R.

use serde::Serialize;
use sokoban_engine::config::EngineSettings;
use sokoban_engine::console_interface::ConsoleInput::*;
use sokoban_engine::console_interface::{
    TerminalRenderer, cleanup_terminal, handle_input, restore_after, setup_terminal,
};
use sokoban_engine::core::{Direction, MoveOutcome, Vec2};
use sokoban_engine::engine::{GameEngine, MoveStats, NullRenderer, Renderer};
use sokoban_engine::level::{BuiltinLevelSource, FileLevelSource, LevelCatalog, LevelDescriptor, LevelSource};
use sokoban_engine::models::GameRenderState;
use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FRAME_POLL: Duration = Duration::from_millis(10);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let switch = args.next().unwrap_or("interactive".to_string());

    let settings = EngineSettings::load();
    init_tracing(&settings)?;
    info!(?settings, "=== Sokoban startup ===");

    let catalog = load_catalog(&settings)?;

    match switch.as_str() {
        "interactive" => {
            let level = parse_level_number(args.next(), &catalog);
            run_interactive(&settings, &catalog, level)?;
        }
        "replay" => {
            let level = parse_level_number(args.next(), &catalog);
            let moves = args.next().unwrap_or_default();
            run_replay(&settings, &catalog, level, &moves)?;
        }
        _ => {
            println!(
                "Unknown mode: {}. Use 'interactive' or 'replay'. defaulting to interactive",
                switch
            );
            run_interactive(&settings, &catalog, 1)?;
        }
    }

    Ok(())
}

fn init_tracing(settings: &EngineSettings) -> Result<(), Box<dyn std::error::Error>> {
    // The terminal belongs to the game screen, so logs go to a file.
    let log_file = File::create(&settings.log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn load_catalog(settings: &EngineSettings) -> Result<LevelCatalog, Box<dyn std::error::Error>> {
    let file_source = FileLevelSource::new(&settings.levels_file);
    let mut sources: Vec<&dyn LevelSource> = vec![&file_source];
    if settings.include_builtin_level {
        sources.push(&BuiltinLevelSource);
    }
    Ok(LevelCatalog::from_sources(&sources)?)
}

fn parse_level_number(arg: Option<String>, catalog: &LevelCatalog) -> usize {
    let requested = match arg.as_deref().map(str::parse::<usize>) {
        None => 1,
        Some(Ok(number)) => number,
        Some(Err(_)) => {
            warn!(?arg, "level number is not a number, starting at level 1");
            1
        }
    };
    catalog.clamp_number(requested)
}

fn run_interactive(
    settings: &EngineSettings,
    catalog: &LevelCatalog,
    level_number: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = catalog.get(level_number).ok_or("level missing from catalog")?;
    let mut engine = GameEngine::new(level, settings);
    let mut renderer = TerminalRenderer::new(
        setup_terminal()?,
        settings.tile_size,
        GameRenderState {
            level: level_number,
            level_count: catalog.len(),
            ..GameRenderState::default()
        },
    );

    restore_after(|| play_level(level, level_number, settings, &mut engine, &mut renderer), cleanup_terminal)
}

fn play_level(
    level: &LevelDescriptor,
    level_number: usize,
    settings: &EngineSettings,
    engine: &mut GameEngine,
    renderer: &mut TerminalRenderer,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        match handle_input(FRAME_POLL) {
            Ok(Quit) => break,
            Ok(Restart) => {
                info!(level_number, "restarting level");
                *engine = GameEngine::new(level, settings);
                renderer.status.last_outcome = None;
            }
            Ok(Move(direction)) => {
                let outcome = engine.attempt_move(direction);
                renderer.status.last_outcome = Some(outcome);
            }
            Ok(_) => {
                // No input, keep animating
            }
            Err(_) => {
                println!("error reading input");
                break;
            }
        }

        let now = Instant::now();
        let report = engine.tick(now - last_tick, renderer)?;
        last_tick = now;

        if report.victory {
            renderer.status.won = true;
            renderer.draw(&engine.snapshot())?;
            // Keep showing the win screen until user inputs
            loop {
                match handle_input(FRAME_POLL) {
                    Ok(Timeout) => {}
                    Ok(_) => break,
                    Err(_) => {
                        println!("error reading input");
                        break;
                    }
                }
            }
            break;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ReplayStep {
    direction: Direction,
    outcome: String,
}

#[derive(Serialize)]
struct ReplayReport {
    level: usize,
    steps: Vec<ReplayStep>,
    player: Vec2,
    stats: MoveStats,
    won: bool,
    seconds: u64,
    map: Vec<String>,
}

fn run_replay(
    settings: &EngineSettings,
    catalog: &LevelCatalog,
    level_number: usize,
    moves: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = catalog.get(level_number).ok_or("level missing from catalog")?;
    let mut engine = GameEngine::new(level, settings);
    let mut steps = Vec::new();

    for c in moves.chars().filter(|c| !c.is_whitespace()) {
        let direction = Direction::from_char(c).ok_or_else(|| format!("unknown move `{}`, expected U/D/L/R", c))?;
        let outcome = engine.attempt_move(direction);
        steps.push(ReplayStep {
            direction,
            outcome: describe(&outcome),
        });
        engine.settle(&mut NullRenderer).unwrap_or_else(|never| match never {});
    }

    let map = engine.to_descriptor()?.map_rows();
    let report = ReplayReport {
        level: level_number,
        steps,
        player: engine.player().position,
        stats: engine.stats(),
        won: engine.is_victory(),
        seconds: engine.elapsed().as_secs(),
        map,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn describe(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Rejected(reason) => format!("rejected: {:?}", reason),
        MoveOutcome::PlayerMoved(_) => "moved".to_string(),
        MoveOutcome::CratePushed(_) => "pushed".to_string(),
        MoveOutcome::VictoryReached(_) => "victory".to_string(),
    }
}
