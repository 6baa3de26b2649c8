//! Browser platform: requestAnimationFrame / setInterval timers,
//! LocalStorage best score, and the JS-facing game handle.
//!
//! Input wiring (keyboard, buttons) stays in JS and calls into [`JumperGame`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{Scheduler, TimerHandle};
use crate::config::EngineConfig;
use crate::persistence::{ScoreStore, parse_best_score};
use crate::sim::Engine;

pub type WebEngine = Engine<WebScheduler>;

enum PendingTimer {
    /// requestAnimationFrame id. The callback frees itself when it runs;
    /// canceling leaks it.
    Frame(i32),
    /// setInterval id and the closure it keeps calling
    Interval {
        id: i32,
        _callback: Closure<dyn FnMut()>,
    },
}

/// Scheduler backed by browser timers
#[derive(Default)]
pub struct WebScheduler {
    target: Weak<RefCell<WebEngine>>,
    pending: HashMap<TimerHandle, PendingTimer>,
    next_id: u64,
}

impl WebScheduler {
    /// Point timer callbacks at the engine that owns this scheduler
    pub fn bind(&mut self, target: Weak<RefCell<WebEngine>>) {
        self.target = target;
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle(self.next_id)
    }

    /// Forget a one-shot frame that has already run
    fn fired(&mut self, handle: TimerHandle) {
        if matches!(self.pending.get(&handle), Some(PendingTimer::Frame(_))) {
            self.pending.remove(&handle);
        }
    }
}

fn fire(target: &Weak<RefCell<WebEngine>>, handle: TimerHandle) {
    let Some(engine) = target.upgrade() else {
        return;
    };
    let Ok(mut engine) = engine.try_borrow_mut() else {
        log::warn!("Timer {handle:?} fired while the engine was busy");
        return;
    };
    engine.scheduler_mut().fired(handle);
    engine.on_timer(handle);
}

impl Scheduler for WebScheduler {
    fn schedule_tick(&mut self) -> TimerHandle {
        let handle = self.next_handle();
        let Some(window) = web_sys::window() else {
            log::error!("No window; frame not scheduled");
            return handle;
        };
        let target = self.target.clone();
        let callback = Closure::once_into_js(move |_time: f64| fire(&target, handle));
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => {
                self.pending.insert(handle, PendingTimer::Frame(id));
            }
            Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
        }
        handle
    }

    fn schedule_interval(&mut self, period_ms: u32) -> TimerHandle {
        let handle = self.next_handle();
        let Some(window) = web_sys::window() else {
            log::error!("No window; interval not scheduled");
            return handle;
        };
        let target = self.target.clone();
        let callback = Closure::<dyn FnMut()>::new(move || fire(&target, handle));
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        ) {
            Ok(id) => {
                self.pending.insert(
                    handle,
                    PendingTimer::Interval {
                        id,
                        _callback: callback,
                    },
                );
            }
            Err(err) => log::error!("setInterval failed: {err:?}"),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let Some(timer) = self.pending.remove(&handle) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            clear(&window, timer);
        }
    }
}

/// Stop a browser timer. An interval's closure is freed once it can no longer run.
fn clear(window: &web_sys::Window, timer: PendingTimer) {
    match timer {
        PendingTimer::Frame(id) => {
            let _ = window.cancel_animation_frame(id);
        }
        PendingTimer::Interval { id, .. } => window.clear_interval_with_handle(id),
    }
}

impl Drop for WebScheduler {
    /// setInterval would otherwise keep calling a freed closure
    fn drop(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for (_, timer) in self.pending.drain() {
            clear(&window, timer);
        }
    }
}

/// Best score in LocalStorage under `jumperHighScore`, stored as a bare integer
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "jumperHighScore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best_score(&self) -> u64 {
        let best = Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .map(|raw| parse_best_score(&raw))
            .unwrap_or(0);
        log::info!("Loaded best score {best}");
        best
    }

    fn save_best_score(&mut self, score: u64) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable; best score not saved");
            return;
        };
        match storage.set_item(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("Best score {score} saved"),
            Err(err) => log::warn!("Failed to save best score: {err:?}"),
        }
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct JumperGame {
    engine: Rc<RefCell<WebEngine>>,
}

#[wasm_bindgen]
impl JumperGame {
    /// Build from optional JSON overrides, falling back to stored config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<JumperGame, JsValue> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json),
            None => Ok(EngineConfig::load()),
        }
        .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))?;

        let engine = Engine::new(
            config,
            WebScheduler::default(),
            Box::new(LocalStorageStore),
        )
        .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))?;

        let engine = Rc::new(RefCell::new(engine));
        engine
            .borrow_mut()
            .scheduler_mut()
            .bind(Rc::downgrade(&engine));
        Ok(Self { engine })
    }

    pub fn start(&self) {
        self.engine.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.engine.borrow_mut().stop();
    }

    /// Start/Stop button
    pub fn toggle(&self) {
        self.engine.borrow_mut().toggle();
    }

    #[wasm_bindgen(js_name = requestJump)]
    pub fn request_jump(&self) {
        self.engine.borrow_mut().request_jump();
    }

    pub fn score(&self) -> f64 {
        self.engine.borrow().score() as f64
    }

    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> f64 {
        self.engine.borrow().best_score() as f64
    }

    #[wasm_bindgen(js_name = runState)]
    pub fn run_state(&self) -> String {
        self.engine.borrow().run_state().as_str().to_string()
    }

    /// Player box as `[x, y, width, height]`
    #[wasm_bindgen(js_name = playerBox)]
    pub fn player_box(&self) -> Vec<f32> {
        self.engine.borrow().player_box().to_array().to_vec()
    }

    /// All obstacle boxes flattened, four floats each
    #[wasm_bindgen(js_name = obstacleBoxes)]
    pub fn obstacle_boxes(&self) -> Vec<f32> {
        self.engine
            .borrow()
            .obstacle_boxes()
            .iter()
            .flat_map(|b| b.to_array())
            .collect()
    }

    /// Full snapshot as JSON, plus events raised since the last call
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        let mut engine = self.engine.borrow_mut();
        let snapshot = engine.snapshot();
        let events = engine.drain_events();
        serde_json::json!({ "snapshot": snapshot, "events": events }).to_string()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Jumper engine loaded");
}
