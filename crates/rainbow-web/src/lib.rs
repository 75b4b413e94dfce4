pub mod runner;

pub use runner::TrackerRunner;

use std::cell::RefCell;

use rainbow_engine::hifitime::{Epoch, Errors};
use rainbow_engine::{AnalyticEphemeris, TrackerConfig, UpdateLoop, WallClock};
use wasm_bindgen::prelude::*;

/// Wall clock read from the browser's `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl WallClock for JsClock {
    fn now(&self) -> Result<Epoch, Errors> {
        Ok(Epoch::from_unix_seconds(js_sys::Date::now() / 1000.0))
    }
}

type Runner = TrackerRunner<AnalyticEphemeris, JsClock>;

thread_local! {
    static RUNNER: RefCell<Option<Runner>> = RefCell::new(None);
}

/// Run `f` against the runner, or log and return `None` before `tracker_init`.
fn with_runner<R>(f: impl FnOnce(&mut Runner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("Tracker not initialized. Call tracker_init() first.");
                None
            }
        }
    })
}

/// Set up logging, load the ephemeris and spawn the dome.
/// `config_json` may be empty for the defaults.
#[wasm_bindgen]
pub fn tracker_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        TrackerConfig::default()
    } else {
        TrackerConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let tracker =
        UpdateLoop::from_config(config, JsClock).map_err(|e| JsValue::from_str(&e.to_string()))?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(TrackerRunner::new(tracker));
    });
    log::info!("rainbow-tracker: initialized");
    Ok(())
}

/// Advance one animation frame; `dt` is seconds since the previous frame.
#[wasm_bindgen]
pub fn tracker_tick(dt: f64) -> Result<(), JsValue> {
    with_runner(|r| r.tick(dt))
        .unwrap_or(Ok(()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Time-control button: 1 +sec, 2 -sec, 3 +min, 4 -min, 5 +hour, 6 -hour, 7 now, 8 start/stop.
#[wasm_bindgen]
pub fn tracker_button(kind: u32) {
    with_runner(|r| r.push_button(kind));
}

/// Commit the latitude/longitude text fields. Applied on the next tick.
#[wasm_bindgen]
pub fn tracker_set_location(latitude: &str, longitude: &str) {
    with_runner(|r| r.set_location(latitude, longitude));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header().as_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_status() -> String {
    with_runner(|r| r.status().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_validation_message() -> Option<String> {
    with_runner(|r| r.validation_message().map(str::to_string)).flatten()
}

/// Why the tracker stopped, if an invariant violation halted it.
#[wasm_bindgen]
pub fn get_halted_reason() -> Option<String> {
    with_runner(|r| r.halted().map(str::to_string)).flatten()
}

#[wasm_bindgen]
pub fn get_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_dome_radius() -> f32 {
    with_runner(|r| r.dome_radius()).unwrap_or(0.0)
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_nodes() -> u32 {
    with_runner(|r| r.max_nodes()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}
