//! Shared helpers for driving sessions on the headless host

#![allow(dead_code)]

use slide_shooter::SessionConfig;
use slide_shooter::platform::headless::{HeadlessWorld, TextDisplay};
use slide_shooter::sim::{GameSession, InputChannel};

pub const FRAME_MS: f32 = 1000.0 / 60.0;

pub struct Rig {
    pub world: HeadlessWorld,
    pub display: TextDisplay,
    pub channel: InputChannel,
    pub session: GameSession,
    pub frame: u32,
}

impl Rig {
    pub fn new(config: SessionConfig) -> Self {
        let mut world = HeadlessWorld::new(800.0, 600.0);
        let display = TextDisplay::new();
        let channel = InputChannel::new();
        let session =
            GameSession::new(&mut world, Box::new(display.clone()), channel.clone(), config);
        Self {
            world,
            display,
            channel,
            session,
            frame: 0,
        }
    }

    /// Reference scenario without random spawns
    pub fn quiet() -> Self {
        Self::new(SessionConfig {
            spawn_probability: 0.0,
            ..SessionConfig::seeded(7)
        })
    }

    /// One host frame: core update, physics step, overlap reports
    pub fn step(&mut self) {
        let time = f64::from(self.frame) * f64::from(FRAME_MS);
        self.session.frame(&mut self.world, time, FRAME_MS);
        self.world.step(FRAME_MS / 1000.0);
        for (a, b) in self.world.overlaps() {
            self.session.overlap(&mut self.world, a, b);
        }
        self.frame += 1;
    }

    pub fn run(&mut self, frames: u32) {
        for _ in 0..frames {
            self.step();
        }
    }
}
