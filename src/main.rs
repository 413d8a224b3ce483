/// Entry point: load config, bring up logging and the terminal, run the loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::File;

use env_logger::{Builder, Env, Target};
use log::warn;

use config::GameConfig;
use sim::game_loop::GameLoop;
use sim::world::WorldState;
use ui::clock::FixedRateClock;
use ui::gamepad::GamepadState;
use ui::input::TerminalInput;
use ui::renderer::TerminalRenderer;
use ui::sound::{process_sound_events, SoundEngine};

fn main() {
    let (config, config_err) = GameConfig::load();
    init_logging(&config);
    if let Some(e) = config_err {
        warn!("{e}; using built-in defaults");
    }

    let world = WorldState::new(config.grid, config.seed);

    let mut renderer = TerminalRenderer::new(config.grid);
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let mut gamepad = GamepadState::new();
    gamepad.load_button_config(&config.gamepad);
    let mut input = TerminalInput::new(gamepad);
    let mut clock = FixedRateClock::new(config.speed.ticks_per_second);
    let sound = SoundEngine::new();

    let mut game = GameLoop::new(world, &mut input, &mut renderer, &mut clock, config.palette);
    let result = game.run(|events| process_sound_events(sound.as_ref(), events));
    let world = game.into_world();

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Grid Snake!");
    println!("Best length: {}", world.best_length);
}

/// `RUST_LOG` overrides the default "warn" filter. Output goes to the
/// configured log file when set, since stderr shares the game screen.
fn init_logging(config: &GameConfig) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("could not open log file {}: {e}", path.display()),
        }
    }
    builder.init();
}
