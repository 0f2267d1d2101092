//! Retro Platformer - headless native runner
//!
//! Usage: `retro-platformer [settings.json] [level.txt ...]`
//!
//! Plays a scripted run (hold right, hop regularly, type initials at the
//! end) through the fixed-timestep driver and logs the final HUD state.
//! `RUST_LOG=debug` shows individual events.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use retro_platformer::audio::{AudioSink, LogAudio, NullAudio};
    use retro_platformer::levels::{builtin_levels, load_level_file};
    use retro_platformer::persistence::JsonFileStore;
    use retro_platformer::sim::{GameState, Snapshot};
    use retro_platformer::{App, PlatformerError, Settings};

    /// Simulated wall-clock length of the demo
    const DEMO_SECONDS: f32 = 90.0;
    /// Frame delta the demo pretends the display runs at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Hop every this many frames
    const HOP_EVERY: u32 = 40;

    pub fn run() -> Result<(), PlatformerError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let settings_path = args
            .first()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("settings.json"));
        let settings = Settings::load(&settings_path);

        let levels = if args.len() > 1 {
            args[1..]
                .iter()
                .map(|p| load_level_file(Path::new(p)))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            builtin_levels()
        };

        let scores = JsonFileStore::new(&settings.scores_path);
        log::info!("High scores file: {}", scores.path().display());

        if settings.muted {
            play(App::new(levels, &settings, NullAudio, scores)?)
        } else {
            let audio = LogAudio::from_settings(&settings);
            play(App::new(levels, &settings, audio, scores)?)
        }
    }

    fn play<A: AudioSink>(mut app: App<A, JsonFileStore>) -> Result<(), PlatformerError> {
        let frames = (DEMO_SECONDS / FRAME_DT) as u32;
        for frame in 0..frames {
            drive(&mut app, frame);
            let was_final = app.session.state.is_final();
            app.frame(FRAME_DT);
            // One full run is enough
            if was_final && app.session.state == GameState::Title {
                break;
            }
        }

        let snapshot: Snapshot = app.snapshot();
        log::info!(
            "Demo finished: state {}, score {}, level {}/{}, lives {}",
            snapshot.state,
            snapshot.score,
            snapshot.level,
            snapshot.level_count,
            snapshot.lives
        );
        log::debug!("{}", serde_json::to_string(&snapshot)?);
        if let Some(top) = app.session.high_scores.entries.first() {
            log::info!("Top score: {} {}", top.name, top.score);
        }
        Ok(())
    }

    /// Scripted input for one frame
    fn drive<A: AudioSink>(app: &mut App<A, JsonFileStore>, frame: u32) {
        let input = &mut app.input;
        match app.session.state {
            GameState::Title => tap(input, "Enter", frame),
            GameState::Play => {
                input.key_down("ArrowRight");
                if frame % HOP_EVERY == 0 {
                    input.key_down("Space");
                } else {
                    input.key_up("Space");
                }
            }
            GameState::Win | GameState::GameOver => {
                input.key_up("ArrowRight");
                if app.session.is_entering_name() {
                    let initials = ["c", "p", "u"];
                    let typed = app.session.name_entry.initials.len();
                    tap(input, initials[typed.min(2)], frame);
                } else {
                    tap(input, "Enter", frame);
                }
            }
            GameState::Dead | GameState::LevelComplete => input.key_up("ArrowRight"),
        }
    }

    /// Alternate down/up so every other frame is a fresh press
    fn tap(input: &mut retro_platformer::input::KeyboardState, key: &str, frame: u32) {
        if frame % 2 == 0 {
            input.key_down(key);
        } else {
            input.key_up(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Retro Platformer (native, headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on wasm; embedders drive `App` themselves
}
