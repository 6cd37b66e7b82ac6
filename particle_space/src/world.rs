//! The simulated world: a bounded population of bodies advanced one tick at a
//! time.
//!
//! A tick runs these passes in order, each over the whole population:
//! 1. integrate last tick's velocity into position
//! 2. pairwise gravity (if enabled), absorbing bodies whose centers coincide
//! 3. wall bounces
//! 4. pairwise elastic collisions
//! 5. compaction of absorbed bodies
//!
//! Forces computed in a tick only move bodies on the next one.

use std::f64::consts::PI;

use common::Viewport;
use glam::DVec2;
use log::{debug, info, trace, warn};

use crate::body::{Body, BodyId};
use crate::config::{SpawnSettings, WorldConfig};
use crate::error::WorldError;
use crate::velocity::Velocity;

/// One body merging into another during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absorption {
    pub survivor: BodyId,
    pub absorbed: BodyId,
}

/// What happened during a tick. Sent to observers as the repaint signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub absorptions: Vec<Absorption>,
    pub collisions: usize,
    pub wall_bounces: usize,
    pub live: usize,
}

pub struct World {
    bodies: Vec<Body>,
    config: WorldConfig,
    gravity_enabled: bool,
    next_id: u64,
    ticks: u64,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            bodies: Vec::with_capacity(config.capacity),
            gravity_enabled: config.gravity_enabled,
            config,
            next_id: 0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bodies.len() >= self.config.capacity
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Live bodies, in spawn order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    pub fn is_gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        if self.gravity_enabled != enabled {
            info!("Gravity {}", if enabled { "ON" } else { "OFF" });
        }
        self.gravity_enabled = enabled;
    }

    pub fn toggle_gravity(&mut self) -> bool {
        self.set_gravity_enabled(!self.gravity_enabled);
        self.gravity_enabled
    }

    /// Add a resting body with its bounding box at `position`
    pub fn spawn(&mut self, position: DVec2, mass: f64, diameter: u32) -> Result<BodyId, WorldError> {
        self.spawn_with_velocity(position, mass, diameter, Velocity::ZERO)
    }

    pub fn spawn_with_velocity(
        &mut self,
        position: DVec2,
        mass: f64,
        diameter: u32,
        velocity: Velocity,
    ) -> Result<BodyId, WorldError> {
        if self.is_full() {
            warn!(
                "Rejected spawn at ({:.1}, {:.1}): world is full",
                position.x, position.y
            );
            return Err(WorldError::CapacityExceeded {
                capacity: self.config.capacity,
            });
        }

        let id = BodyId::new(self.next_id);
        self.next_id += 1;
        self.bodies
            .push(Body::new(id, position, mass, diameter).with_velocity(velocity));

        info!(
            "Spawned body {} at ({:.1}, {:.1}) mass={} diameter={} ({}/{})",
            id,
            position.x,
            position.y,
            mass,
            diameter,
            self.bodies.len(),
            self.config.capacity
        );
        Ok(id)
    }

    /// Spawn the body a drag from `start` to `end` describes
    pub fn launch(
        &mut self,
        settings: &SpawnSettings,
        start: DVec2,
        end: DVec2,
        viewport: Viewport,
    ) -> Result<BodyId, WorldError> {
        let launch = settings.launch(start, end, viewport);
        self.spawn_with_velocity(launch.position, launch.mass, launch.diameter, launch.velocity)
    }

    pub fn contains_point(&self, point: DVec2) -> bool {
        self.bodies.iter().any(|body| body.contains_point(point))
    }

    /// Advance the world by one tick inside `viewport`
    pub fn tick(&mut self, viewport: Viewport) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            ..Default::default()
        };

        for body in &mut self.bodies {
            body.integrate();
        }

        let mut absorbed = vec![false; self.bodies.len()];
        if self.gravity_enabled {
            self.apply_gravity(&mut absorbed, &mut report);
        }

        for body in &mut self.bodies {
            if body.bounce_off_walls(viewport).is_some() {
                report.wall_bounces += 1;
            }
        }

        self.resolve_collisions(&mut report);
        self.compact(&absorbed);

        report.live = self.bodies.len();
        trace!(
            "Tick {}: {} live, {} collisions, {} wall bounces",
            report.tick,
            report.live,
            report.collisions,
            report.wall_bounces
        );
        report
    }

    /// Pairwise Newtonian attraction, F = G·m1·m2 / d², as a velocity kick on
    /// both bodies. Bodies whose centers coincide merge instead: the heavier
    /// one absorbs the lighter, and on equal masses the later body wins.
    fn apply_gravity(&mut self, absorbed: &mut [bool], report: &mut TickReport) {
        let g = self.config.gravitational_constant;
        let n = self.bodies.len();

        for i in 0..n {
            if absorbed[i] {
                continue;
            }
            for j in (i + 1)..n {
                if absorbed[j] {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                let (center_a, center_b) = (a.center(), b.center());

                // d = 0 would divide by zero below
                if center_a == center_b {
                    let merge = if a.mass() > b.mass() {
                        a.absorb(b);
                        absorbed[j] = true;
                        Absorption {
                            survivor: a.id(),
                            absorbed: b.id(),
                        }
                    } else {
                        b.absorb(a);
                        absorbed[i] = true;
                        Absorption {
                            survivor: b.id(),
                            absorbed: a.id(),
                        }
                    };
                    debug!("Body {} absorbed body {}", merge.survivor, merge.absorbed);
                    report.absorptions.push(merge);

                    if absorbed[i] {
                        break;
                    }
                    continue;
                }

                let force = g * a.mass() * b.mass() / center_a.distance_squared(center_b);
                let delta = center_b - center_a;
                let angle = delta.y.atan2(delta.x);

                let (mass_a, mass_b) = (a.mass(), b.mass());
                a.apply_velocity(Velocity::new(
                    force * angle.cos() / mass_a,
                    force * angle.sin() / mass_a,
                ));
                b.apply_velocity(Velocity::new(
                    force * (angle + PI).cos() / mass_b,
                    force * (angle + PI).sin() / mass_b,
                ));
            }
        }
    }

    /// Approximate elastic response for every overlapping pair, one axis at a
    /// time. Bodies absorbed this tick still take part.
    fn resolve_collisions(&mut self, report: &mut TickReport) {
        let n = self.bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if !a.overlaps(b) {
                    continue;
                }

                let (velocity_a, velocity_b) = (a.velocity(), b.velocity());
                let (mass_a, mass_b) = (a.mass(), b.mass());

                a.apply_velocity(velocity_a.negate());
                a.apply_elastic(velocity_b, mass_b);

                b.apply_velocity(velocity_b.negate());
                b.apply_elastic(velocity_a, mass_a);

                report.collisions += 1;
            }
        }

        if report.collisions > 0 {
            debug!("Tick {}: {} collisions", report.tick, report.collisions);
        }
    }

    /// Drop every body flagged in `absorbed`, keeping survivors in order
    fn compact(&mut self, absorbed: &[bool]) {
        let mut index = 0;
        self.bodies.retain(|_| {
            let keep = !absorbed[index];
            index += 1;
            keep
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Mutable references to two distinct bodies, `i < j`
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
