//! Slide Shooter entry point
//!
//! In the browser the library's `SlideDemo` is constructed by the slide
//! deck, so there is nothing to run here. Natively this plays a scripted
//! session on the headless host and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use slide_shooter::SessionConfig;
    use slide_shooter::platform::headless::{HeadlessWorld, TextDisplay};
    use slide_shooter::sim::{Acceleration, GameSession, InputChannel};

    env_logger::init();
    log::info!("Slide Shooter (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);

    let mut world = HeadlessWorld::new(1280.0, 720.0);
    let display = TextDisplay::new();
    let channel = InputChannel::new();
    let mut session = GameSession::new(
        &mut world,
        Box::new(display.clone()),
        channel.clone(),
        SessionConfig::seeded(seed),
    );

    // 30 seconds at 60 Hz: sway the ship and fire twice a second
    const DT_MS: f32 = 1000.0 / 60.0;
    for frame in 0..1800u32 {
        let t = frame as f32 * DT_MS / 1000.0;
        channel.set_acceleration(Some(Acceleration::new((t * 1.3).sin() * 600.0, 0.0)));
        if frame % 30 == 0 {
            channel.press("a");
        }

        session.frame(&mut world, f64::from(frame) * f64::from(DT_MS), DT_MS);
        world.step(DT_MS / 1000.0);
        for (a, b) in world.overlaps() {
            session.overlap(&mut world, a, b);
        }
    }

    session.dispose(&mut world);
    println!("{}", display.text());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the exported SlideDemo, this is just to satisfy the compiler
}
