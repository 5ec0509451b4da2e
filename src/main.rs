//! # Warren Main Entry Point
//!
//! Builds a session from the command line and runs it either from commands
//! read on stdin or as an autoplay demo for a fixed number of turns.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use warren::{
    autoplay_intent, config, parse_command, tick_effects, AsciiRenderer, GameConfig, Intent,
    PlayerInput, TurnEngine, WarrenError, WarrenResult, WorldStore, HELP_TEXT,
};

/// Command line arguments for Warren.
#[derive(Parser, Debug)]
#[command(name = "warren")]
#[command(about = "A deterministic turn-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Seed for the session's random stream (clock-derived when omitted)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Play this many turns automatically instead of reading commands
    #[arg(long, value_name = "TURNS")]
    autoplay: Option<u32>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the final render snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> WarrenResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;
    log::info!("Starting Warren v{}", warren::VERSION);

    let game_config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    game_config.validate()?;

    let mut session = Session::new(game_config, args.seed)?;

    match args.autoplay {
        Some(turns) => session.autoplay(turns)?,
        None => session.interactive()?,
    }

    if args.json {
        println!("{}", session.store.snapshot().to_json()?);
    }

    log::info!("Session ended");
    Ok(())
}

/// Installs `env_logger` at the requested level. `RUST_LOG` still overrides it.
fn initialize_logging(log_level: &str) -> WarrenResult<()> {
    let level: log::LevelFilter = log_level
        .parse()
        .map_err(|_| WarrenError::InvalidConfig(format!("Unknown log level: {}", log_level)))?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();

    Ok(())
}

/// One play session: the store, the engine driving it and the text view.
struct Session {
    engine: TurnEngine,
    store: WorldStore,
    renderer: AsciiRenderer,
    seed: Option<u32>,
    restarts: u32,
}

impl Session {
    fn new(game_config: GameConfig, seed: Option<u32>) -> WarrenResult<Self> {
        let mut store = WorldStore::from_config(&game_config.generation, seed);
        store.subscribe(|state| {
            log::trace!(
                "State changed: player {} hp {}, {} enemies",
                state.player.position,
                state.player.hp,
                state.enemies.len()
            )
        });

        let engine = TurnEngine::new(game_config);
        engine.init_level(&mut store)?;
        log::info!("Session seed {}", store.state().rng_seed);

        Ok(Self {
            engine,
            store,
            renderer: AsciiRenderer::new(),
            seed,
            restarts: 0,
        })
    }

    /// New floor. Seeded sessions stay reproducible by deriving each
    /// restart's seed from the session seed.
    fn restart(&mut self) -> WarrenResult<()> {
        self.restarts += 1;
        match self.seed {
            Some(seed) => self
                .engine
                .restart_with_seed(&mut self.store, seed.wrapping_add(self.restarts))?,
            None => self.engine.restart(&mut self.store)?,
        }
        self.renderer.messages.clear();
        self.renderer
            .add_message(format!("New floor (seed {}).", self.store.state().rng_seed));
        Ok(())
    }

    fn play(&mut self, intent: Intent) -> WarrenResult<()> {
        // Effects from the previous turn have been shown once; let them expire.
        tick_effects(&mut self.store, config::EFFECT_LIFETIME_MS);

        if self.store.state().input_locked {
            self.renderer.add_message("Press r to restart.".to_string());
            return Ok(());
        }

        let events = self.engine.step_turn(&mut self.store, Some(intent))?;
        for message in events.iter().filter_map(|event| event.message()) {
            self.renderer.add_message(message);
        }
        Ok(())
    }

    fn frame(&self) -> String {
        self.renderer.render(&self.store.snapshot())
    }

    fn interactive(&mut self) -> WarrenResult<()> {
        println!("{}", HELP_TEXT);
        println!("{}", self.frame());
        prompt()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let inputs = match parse_command(&line?) {
                Ok(inputs) => inputs,
                Err(e) => {
                    self.renderer.add_message(e.to_string());
                    Vec::new()
                }
            };

            for input in inputs {
                match input {
                    PlayerInput::Quit => return Ok(()),
                    PlayerInput::Help => println!("{}", HELP_TEXT),
                    PlayerInput::Restart => self.restart()?,
                    PlayerInput::Act(intent) => self.play(intent)?,
                }
            }

            println!("{}", self.frame());
            prompt()?;
        }

        Ok(())
    }

    fn autoplay(&mut self, turns: u32) -> WarrenResult<()> {
        for turn in 0..turns {
            if self.store.state().input_locked {
                log::info!("Autoplay restarting after turn {}", turn);
                self.restart()?;
                continue;
            }
            let intent = autoplay_intent(self.store.state());
            self.play(intent)?;
        }

        println!("{}", self.frame());
        Ok(())
    }
}

fn prompt() -> WarrenResult<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}
