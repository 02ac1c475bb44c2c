use stroll_engine::bridge::protocol::{FrameHeader, ProtocolLayout, HEADER_FLOATS};
use stroll_engine::systems::render::build_render_buffer;
use stroll_engine::{
    AssetManifest, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    KeyEdge, RenderBuffer, RenderContext, SpriteRegistry,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `memory-walk`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Stand-in for `input` on the extra steps of a catch-up frame.
    no_input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        let viewport = self.ctx.camera.viewport;
        self.ctx.camera.resize(viewport.x, viewport.y, &self.config.zoom);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Push a raw browser key code. Keys that are not direction keys are dropped.
    pub fn push_key(&mut self, key_code: u32, down: bool) {
        let edge = if down { KeyEdge::Down } else { KeyEdge::Up };
        self.input.push_key(key_code, edge);
    }

    /// The page lost focus. Held keys and any open press are dropped.
    pub fn focus_lost(&mut self) {
        self.input.push(InputEvent::FocusLost);
    }

    /// Viewport changed: re-zoom the camera, then let the game react.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height, &self.config.zoom);
        log::debug!("resize {}x{} -> zoom {}", width, height, self.ctx.camera.zoom);
        if self.initialized {
            self.game.resize(&mut self.ctx, width, height);
        }
    }

    /// Parse an asset manifest and replace the sprite registry.
    pub fn load_manifest(&mut self, json: &str) -> bool {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                self.ctx.sprites = SpriteRegistry::from_manifest(&manifest);
                log::info!("manifest: {} sprites", self.ctx.sprites.sprite_count());
                true
            }
            Err(err) => {
                log::error!("manifest rejected: {}", err);
                false
            }
        }
    }

    /// Hand a Tiled JSON map to the game. The previous world stays on failure.
    pub fn load_world(&mut self, json: &str) -> bool {
        match self.game.load_world(&mut self.ctx, json) {
            Ok(()) => true,
            Err(err) => {
                log::error!("world setup failed: {}", err);
                false
            }
        }
    }

    /// Run one frame tick: update game, build render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Fixed timestep accumulation. Input is delivered to the first step only.
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.ctx.clock.advance(self.timestep.dt());
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
        }

        // Events wait for a frame that actually runs a step.
        if steps > 0 {
            self.input.drain();
        }
        self.ctx.events.truncate(self.layout.max_events);

        build_render_buffer(&self.ctx.scene, &self.ctx.tilemaps, &self.ctx.camera, &mut self.render_buffer);

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }

        if self.render_buffer.instances.len() > self.layout.max_instances {
            log::warn!(
                "render buffer overflow: {} > {}",
                self.render_buffer.instances.len(),
                self.layout.max_instances
            );
            self.render_buffer.instances.truncate(self.layout.max_instances);
        }

        self.frame = self.frame.wrapping_add(1);
        let bounds = self.ctx.camera.bounds;
        self.header = FrameHeader {
            frame: self.frame,
            instance_count: self.render_buffer.instance_count(),
            ui_start: self.render_buffer.ui_start,
            event_count: self.ctx.events.len() as u32,
            world_width: bounds.map_or(self.config.world_width, |b| b.size.x),
            world_height: bounds.map_or(self.config.world_height, |b| b.size.y),
            camera_x: self.ctx.camera.center.x,
            camera_y: self.ctx.camera.center.y,
            zoom: self.ctx.camera.zoom,
            overlay_visible: self.ctx.overlay.visible,
            overlay_revision: self.ctx.overlay.revision,
            clock_ms: self.ctx.clock.now_ms(),
        }
        .to_floats(&self.layout);
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn ui_start(&self) -> u32 {
        self.render_buffer.ui_start
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Camera and overlay ----

    pub fn camera_x(&self) -> f32 {
        self.ctx.camera.center.x
    }

    pub fn camera_y(&self) -> f32 {
        self.ctx.camera.center.y
    }

    pub fn zoom(&self) -> f32 {
        self.ctx.camera.zoom
    }

    pub fn overlay_text(&self) -> String {
        self.ctx.overlay.text.clone()
    }

    pub fn overlay_visible(&self) -> bool {
        self.ctx.overlay.visible
    }

    pub fn overlay_revision(&self) -> u32 {
        self.ctx.overlay.revision
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
