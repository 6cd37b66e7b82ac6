//! Headless Particle Space host
//!
//! Stands in for the window the simulation normally lives in:
//! - a scheduler thread ticks the shared world once per millisecond
//! - the main thread plays the user, dragging out new bodies at random spots
//!   and toggling gravity every few seconds
//! - repaint notifications are drained, and a frame of body snapshots is
//!   logged at roughly 60 Hz
//!
//! Run with `RUST_LOG=info` (or `debug`, `trace`) to watch the simulation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use glam::DVec2;
use log::{debug, info, warn};
use particle_space::{
    constants::{MASS_RANGE, RADIUS_RANGE},
    SharedWorld, SpawnSettings, TickReport, Viewport, World, WorldError,
};
use rand::rngs::ThreadRng;
use rand::Rng;

const TICK_INTERVAL: Duration = Duration::from_millis(1);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const LAUNCH_INTERVAL: Duration = Duration::from_millis(400);
const GRAVITY_INTERVAL: Duration = Duration::from_secs(4);
const RUN_TIME: Duration = Duration::from_secs(12);

/// Fixed-rate tick thread. Ticks serialize on the world lock, so falling
/// behind only delays them.
struct Scheduler {
    running: Arc<AtomicBool>,
    handle: JoinHandle<u64>,
}

impl Scheduler {
    fn start(world: SharedWorld, viewport: Viewport) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = thread::spawn(move || {
            let mut ticks = 0;
            let mut next = Instant::now();
            while flag.load(Ordering::Relaxed) {
                world.tick(viewport);
                ticks += 1;

                next += TICK_INTERVAL;
                let now = Instant::now();
                if next > now {
                    thread::sleep(next - now);
                } else {
                    next = now;
                }
            }
            ticks
        });

        Self { running, handle }
    }

    fn stop(self) -> u64 {
        self.running.store(false, Ordering::Relaxed);
        match self.handle.join() {
            Ok(ticks) => ticks,
            Err(_) => {
                warn!("Scheduler thread panicked");
                0
            }
        }
    }
}

struct App {
    world: SharedWorld,
    viewport: Viewport,
    settings: SpawnSettings,
    repaints: Receiver<TickReport>,
    rng: ThreadRng,
    last_frame: Instant,
    last_launch: Instant,
    last_toggle: Instant,
    frames: u64,
}

impl App {
    fn new(world: SharedWorld, viewport: Viewport) -> Self {
        let repaints = world.subscribe();
        let now = Instant::now();

        Self {
            world,
            viewport,
            settings: SpawnSettings::default(),
            repaints,
            rng: rand::thread_rng(),
            last_frame: now,
            last_launch: now,
            last_toggle: now,
            frames: 0,
        }
    }

    fn update(&mut self, now: Instant) {
        if now - self.last_launch >= LAUNCH_INTERVAL {
            self.last_launch = now;
            self.handle_drag();
        }

        if now - self.last_toggle >= GRAVITY_INTERVAL {
            self.last_toggle = now;
            self.world.toggle_gravity();
        }

        let mut pending = false;
        for report in self.repaints.try_iter() {
            pending = true;
            for merge in &report.absorptions {
                info!("Body {} absorbed body {}", merge.survivor, merge.absorbed);
            }
        }

        if pending && now - self.last_frame >= FRAME_INTERVAL {
            self.last_frame = now;
            self.render();
        }
    }

    /// A random drag: settle on a radius and mass, press somewhere, release a
    /// little way off
    fn handle_drag(&mut self) {
        if self.world.is_full() {
            debug!("World is full, ignoring press");
            return;
        }

        self.settings
            .set_radius(self.rng.gen_range(RADIUS_RANGE.clone()));
        self.settings.set_mass(self.rng.gen_range(MASS_RANGE.clone()));

        let margin = self.settings.diameter() as f64 + 2.0;
        let size = self.viewport.size();
        let start = DVec2::new(
            self.rng.gen_range(margin..size.x - margin),
            self.rng.gen_range(margin..size.y - margin),
        );
        let drag = DVec2::new(
            self.rng.gen_range(-300.0..300.0),
            self.rng.gen_range(-300.0..300.0),
        );

        match self
            .world
            .launch(&self.settings, start, start + drag, self.viewport)
        {
            Ok(Some(_)) => {}
            Ok(None) => debug!("Press at ({:.0}, {:.0}) landed on a body", start.x, start.y),
            Err(WorldError::CapacityExceeded { capacity }) => {
                warn!("Launch dropped, already {capacity} bodies")
            }
        }
    }

    fn render(&mut self) {
        self.frames += 1;
        for body in self.world.snapshot() {
            debug!(
                "frame {} body {} at ({:.1}, {:.1}) d={} {:?}",
                self.frames, body.id, body.position.x, body.position.y, body.diameter, body.band
            );
        }
    }
}

fn main() {
    env_logger::init();

    let viewport = Viewport::default();
    let world = SharedWorld::new(World::default());
    let mut app = App::new(world.clone(), viewport);

    info!(
        "Particle space {}x{}, gravity {}",
        viewport.width,
        viewport.height,
        if world.is_gravity_enabled() { "ON" } else { "OFF" }
    );

    let scheduler = Scheduler::start(world.clone(), viewport);
    let started = Instant::now();

    while started.elapsed() < RUN_TIME {
        app.update(Instant::now());
        thread::sleep(TICK_INTERVAL);
    }

    let ticks = scheduler.stop();
    info!(
        "Ran {} ticks, drew {} frames, {} bodies left",
        ticks,
        app.frames,
        world.len()
    );
    world.read(|world| {
        for body in world.bodies() {
            info!(
                "Body {}: center ({:.1}, {:.1}) mass {} diameter {} {:?}",
                body.id(),
                body.center().x,
                body.center().y,
                body.mass(),
                body.diameter(),
                body.band()
            );
        }
    });
}
