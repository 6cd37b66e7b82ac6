//! Thread-safe handle to a world shared between the tick scheduler and the UI
//!
//! Every operation takes the one world-wide lock for its whole duration, so a
//! tick never interleaves with a spawn, a point query, or a snapshot for
//! drawing, and two ticks never run at once.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::Viewport;
use glam::DVec2;

use crate::body::{BodyId, DensityBand};
use crate::config::SpawnSettings;
use crate::error::WorldError;
use crate::velocity::Velocity;
use crate::world::{TickReport, World};

/// What the renderer needs to draw one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: DVec2,
    pub diameter: u32,
    pub band: DensityBand,
}

struct Inner {
    world: World,
    observers: Vec<Sender<TickReport>>,
}

#[derive(Clone)]
pub struct SharedWorld {
    inner: Arc<Mutex<Inner>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                world,
                observers: Vec::new(),
            })),
        }
    }

    // A panic mid-tick leaves the bodies in a state no worse than a skipped
    // pass, so keep going with whatever is there.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Receive a report after every tick; the repaint signal for a renderer.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<TickReport> {
        let (tx, rx) = mpsc::channel();
        self.lock().observers.push(tx);
        rx
    }

    pub fn tick(&self, viewport: Viewport) -> TickReport {
        let mut inner = self.lock();
        let report = inner.world.tick(viewport);
        inner
            .observers
            .retain(|observer| observer.send(report.clone()).is_ok());
        report
    }

    pub fn spawn(&self, position: DVec2, mass: f64, diameter: u32) -> Result<BodyId, WorldError> {
        self.lock().world.spawn(position, mass, diameter)
    }

    pub fn spawn_with_velocity(
        &self,
        position: DVec2,
        mass: f64,
        diameter: u32,
        velocity: Velocity,
    ) -> Result<BodyId, WorldError> {
        self.lock()
            .world
            .spawn_with_velocity(position, mass, diameter, velocity)
    }

    /// Launch a body from a drag, unless the drag started on an existing body
    /// (`Ok(None)`). The check and the spawn happen under one lock.
    pub fn launch(
        &self,
        settings: &SpawnSettings,
        start: DVec2,
        end: DVec2,
        viewport: Viewport,
    ) -> Result<Option<BodyId>, WorldError> {
        let mut inner = self.lock();
        if inner.world.contains_point(start) {
            return Ok(None);
        }
        inner.world.launch(settings, start, end, viewport).map(Some)
    }

    pub fn contains_point(&self, point: DVec2) -> bool {
        self.lock().world.contains_point(point)
    }

    pub fn is_full(&self) -> bool {
        self.lock().world.is_full()
    }

    pub fn len(&self) -> usize {
        self.lock().world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().world.is_empty()
    }

    pub fn is_gravity_enabled(&self) -> bool {
        self.lock().world.is_gravity_enabled()
    }

    pub fn set_gravity_enabled(&self, enabled: bool) {
        self.lock().world.set_gravity_enabled(enabled);
    }

    pub fn toggle_gravity(&self) -> bool {
        self.lock().world.toggle_gravity()
    }

    /// Copy out everything needed for drawing, so the lock is not held while
    /// rendering
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.lock()
            .world
            .bodies()
            .iter()
            .map(|body| BodySnapshot {
                id: body.id(),
                position: body.position(),
                diameter: body.diameter(),
                band: body.band(),
            })
            .collect()
    }

    /// Run `f` with shared access to the world, holding the lock throughout
    pub fn read<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        f(&self.lock().world)
    }
}

impl Default for SharedWorld {
    fn default() -> Self {
        Self::new(World::default())
    }
}
