//! Browser facade
//!
//! The slide deck's JavaScript owns the engine (rendering, arcade
//! physics, assets) and exposes it through a duck-typed host object.
//! `SlideDemo` is what the deck constructs when the slide is shown and
//! disposes when it is left.

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::settings::SessionConfig;
use crate::sim::{
    Acceleration, BodySpec, BodyState, EntityId, GameSession, InputChannel, PhysicsHost,
    ScoreDisplay,
};

#[wasm_bindgen]
extern "C" {
    /// Engine host implemented in JavaScript
    pub type JsHost;

    #[wasm_bindgen(method, js_name = worldWidth)]
    fn world_width(this: &JsHost) -> f32;

    #[wasm_bindgen(method, js_name = worldHeight)]
    fn world_height(this: &JsHost) -> f32;

    #[wasm_bindgen(method, js_name = createBody)]
    fn js_create_body(
        this: &JsHost,
        id: u32,
        kind: &str,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        scale: f32,
        enabled: bool,
        collide_world_bounds: bool,
    );

    /// `[x, y, width, height, vx, vy]` (center position), or undefined
    #[wasm_bindgen(method, js_name = bodyState)]
    fn body_state(this: &JsHost, id: u32) -> JsValue;

    #[wasm_bindgen(method, js_name = resetBody)]
    fn js_reset_body(this: &JsHost, id: u32, x: f32, y: f32);

    #[wasm_bindgen(method, js_name = setVelocity)]
    fn js_set_velocity(this: &JsHost, id: u32, vx: f32, vy: f32);

    #[wasm_bindgen(method, js_name = setEnabled)]
    fn js_set_enabled(this: &JsHost, id: u32, enabled: bool);

    #[wasm_bindgen(method, js_name = destroyBody)]
    fn js_destroy_body(this: &JsHost, id: u32);

    #[wasm_bindgen(method, js_name = showScore)]
    fn show_score(this: &JsHost, text: &str);

    #[wasm_bindgen(method, js_name = anchorScore)]
    fn anchor_score(this: &JsHost, x: f32, y: f32);
}

impl PhysicsHost for JsHost {
    fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width(), self.world_height())
    }

    fn create_body(&mut self, id: EntityId, spec: BodySpec) {
        self.js_create_body(
            id,
            spec.kind.as_str(),
            spec.pos.x,
            spec.pos.y,
            spec.vel.x,
            spec.vel.y,
            spec.scale,
            spec.enabled,
            spec.collide_world_bounds,
        );
    }

    fn body(&self, id: EntityId) -> Option<BodyState> {
        let value = self.body_state(id);
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let raw = js_sys::Float32Array::from(value).to_vec();
        let [x, y, w, h, vx, vy]: [f32; 6] = raw.get(..6)?.try_into().ok()?;
        Some(BodyState {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            vel: Vec2::new(vx, vy),
        })
    }

    fn reset_body(&mut self, id: EntityId, pos: Vec2) {
        self.js_reset_body(id, pos.x, pos.y);
    }

    fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        self.js_set_velocity(id, vel.x, vel.y);
    }

    fn set_enabled(&mut self, id: EntityId, enabled: bool) {
        self.js_set_enabled(id, enabled);
    }

    fn destroy_body(&mut self, id: EntityId) {
        self.js_destroy_body(id);
    }
}

/// Bitmap-text label routed through the host object
struct JsScoreLabel(JsHost);

impl ScoreDisplay for JsScoreLabel {
    fn show(&mut self, text: &str) {
        self.0.show_score(text);
    }

    fn anchor(&mut self, pos: Vec2) {
        self.0.anchor_score(pos.x, pos.y);
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialised by an earlier slide visit
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One visit of the demo slide
#[wasm_bindgen]
pub struct SlideDemo {
    host: JsHost,
    channel: InputChannel,
    session: Option<GameSession>,
}

#[wasm_bindgen]
impl SlideDemo {
    /// Start the scene inside the element with id `target`
    #[wasm_bindgen(constructor)]
    pub fn new(
        target: &str,
        host: JsHost,
        config_json: Option<String>,
    ) -> Result<SlideDemo, JsValue> {
        init_logging();

        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(target));
        if container.is_none() {
            log::warn!("Target container #{} not found", target);
        }

        let config = match config_json {
            Some(json) => SessionConfig::from_json(&json).map_err(|e| {
                JsValue::from(js_sys::Error::new(&format!("Invalid demo config: {}", e)))
            })?,
            None => SessionConfig::default(),
        };

        log::info!("Start demo");
        let label = JsScoreLabel((*host).clone().unchecked_into());
        let channel = InputChannel::new();
        let mut host = host;
        let session = GameSession::new(&mut host, Box::new(label), channel.clone(), config);

        Ok(SlideDemo {
            host,
            channel,
            session: Some(session),
        })
    }

    /// Per-frame hook (`time` and `delta` in ms)
    pub fn frame(&mut self, time: f64, delta: f32) -> bool {
        match self.session.as_mut() {
            Some(session) => session.frame(&mut self.host, time, delta),
            None => false,
        }
    }

    /// Spawn check for hosts that schedule it themselves
    #[wasm_bindgen(js_name = spawnTick)]
    pub fn spawn_tick(&mut self) -> Option<u32> {
        self.session.as_mut()?.check_spawn(&mut self.host)
    }

    /// Overlap report; returns whether the bodies should be separated
    pub fn overlap(&mut self, a: u32, b: u32) -> bool {
        match self.session.as_mut() {
            Some(session) => session.overlap(&mut self.host, a, b),
            None => false,
        }
    }

    /// Remote button press
    pub fn button(&self, id: &str) -> bool {
        self.channel.press(id)
    }

    /// Latest accelerometer reading
    pub fn accelerate(&self, x: f32, y: f32) {
        self.channel.set_acceleration(Some(Acceleration::new(x, y)));
    }

    #[wasm_bindgen(js_name = releaseAcceleration)]
    pub fn release_acceleration(&self) {
        self.channel.set_acceleration(None);
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let Some(session) = self.session.as_ref() else {
            return Ok("null".to_string());
        };
        serde_json::to_string(&session.snapshot())
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))
    }

    /// End the demo. Safe to call more than once.
    pub fn dispose(&mut self) {
        let Some(mut session) = self.session.take() else {
            log::warn!("Demo disposed twice");
            return;
        };
        session.dispose(&mut self.host);
        log::info!("End demo");
    }
}
