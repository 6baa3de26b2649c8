//! Jumper headless demo
//!
//! Plays one run on the virtual clock with the autopilot jumping, then
//! prints the final snapshot. The browser build drives the engine through
//! the `JumperGame` bindings instead.
//!
//! Environment:
//! - `JUMPER_CONFIG`: path to a JSON config override file
//! - `JUMPER_BEST_SCORE_FILE`: where to keep the best score (in-memory otherwise)
//! - `JUMPER_DEMO_SECONDS`: simulated play time (default 120)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use jumper::persistence::{FileStore, MemoryStore, ScoreStore};
    use jumper::sim::autopilot;
    use jumper::{Engine, EngineConfig, ManualScheduler, RunState};

    env_logger::init();
    log::info!("Jumper (native) starting...");

    let config = match std::env::var("JUMPER_CONFIG") {
        Ok(path) => match EngineConfig::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Bad config {path}: {err}");
                std::process::exit(1);
            }
        },
        Err(_) => EngineConfig::default(),
    };

    let store: Box<dyn ScoreStore> = match std::env::var("JUMPER_BEST_SCORE_FILE") {
        Ok(path) => Box::new(FileStore::new(path)),
        Err(_) => Box::new(MemoryStore::default()),
    };

    let seconds: f64 = std::env::var("JUMPER_DEMO_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(120.0);

    let mut engine = match Engine::new(config, ManualScheduler::default(), store) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("Engine rejected config: {err}");
            std::process::exit(1);
        }
    };

    engine.start();
    let frames = (seconds * 1000.0 / engine.scheduler().frame_ms()).ceil() as u64;
    for _ in 0..frames {
        if autopilot::should_jump(
            engine.player(),
            engine.obstacles(),
            engine.difficulty().obstacle_speed(),
        ) {
            engine.request_jump();
        }
        engine.step_frame();

        for event in engine.drain_events() {
            log::debug!("{event:?}");
        }
        if engine.run_state() != RunState::Running {
            break;
        }
    }
    if engine.run_state() == RunState::Running {
        engine.stop();
    }

    match serde_json::to_string_pretty(&engine.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Snapshot serialization failed: {err}"),
    }
    log::info!(
        "Finished: {:?} after {} ticks, score {} (best {})",
        engine.run_state(),
        engine.ticks(),
        engine.score(),
        engine.best_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
