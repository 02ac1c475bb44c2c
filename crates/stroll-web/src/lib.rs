pub mod runner;

pub use runner::GameRunner;
pub use stroll_engine;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// This macro generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MemoryWalk;
///
/// stroll_web::export_game!(MemoryWalk, "memory-walk");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `stroll_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, t_ms: f64) {
            with_runner(|r| r.push_input($crate::stroll_engine::InputEvent::pointer_down(x, y, t_ms)));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32, t_ms: f64) {
            with_runner(|r| r.push_input($crate::stroll_engine::InputEvent::pointer_up(x, y, t_ms)));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_key(key_code, true));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_key(key_code, false));
        }

        #[wasm_bindgen]
        pub fn game_focus_lost() {
            with_runner(|r| r.focus_lost());
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) -> bool {
            with_runner(|r| r.load_manifest(json))
        }

        #[wasm_bindgen]
        pub fn game_load_world(json: &str) -> bool {
            with_runner(|r| r.load_world(json))
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_ui_start() -> u32 {
            with_runner(|r| r.ui_start())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_camera_x() -> f32 {
            with_runner(|r| r.camera_x())
        }

        #[wasm_bindgen]
        pub fn get_camera_y() -> f32 {
            with_runner(|r| r.camera_y())
        }

        #[wasm_bindgen]
        pub fn get_zoom() -> f32 {
            with_runner(|r| r.zoom())
        }

        // ---- Overlay accessors (polled by the page) ----

        #[wasm_bindgen]
        pub fn get_overlay_text() -> String {
            with_runner(|r| r.overlay_text())
        }

        #[wasm_bindgen]
        pub fn get_overlay_visible() -> bool {
            with_runner(|r| r.overlay_visible())
        }

        #[wasm_bindgen]
        pub fn get_overlay_revision() -> u32 {
            with_runner(|r| r.overlay_revision())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
