//! Particle Space
//!
//! A bounded 2D population of circular bodies that attract each other, bounce
//! off the viewport walls, collide, and merge when their centers coincide.
//!
//! - [`Velocity`]: per-tick displacement, clamped to one unit per axis
//! - [`Body`]: a particle and its geometry, integration, and force response
//! - [`World`]: the population and the per-tick update
//! - [`SharedWorld`]: the world behind a single lock, for a scheduler thread
//!   and a UI thread to share

pub mod body;
pub mod config;
pub mod error;
pub mod shared;
pub mod velocity;
pub mod world;

pub use body::{Axis, Body, BodyId, DensityBand};
pub use config::{Launch, SpawnSettings, WorldConfig};
pub use error::WorldError;
pub use shared::{BodySnapshot, SharedWorld};
pub use velocity::Velocity;
pub use world::{Absorption, TickReport, World};

pub use common::{constants, Viewport};
