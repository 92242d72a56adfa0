pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod setup;
#[cfg(feature = "export")]
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::config::PhysicsConfig;
pub use api::types::{BodyId, CollisionEvent, Contact, HoldMode, PocketId, WallId};
pub use core::pocket::Capture;
pub use core::registry::{Body, BodyRegistry, Bounds, Pocket, StagingTray, Table, Wall};
pub use core::simulation::{Simulation, StepStats};
pub use core::time::FrameSubsteps;
pub use error::{ConfigError, ShuffleError};
pub use input::queue::{Command, CommandQueue};
pub use input::shot::shot_velocity;
pub use setup::{RackLayout, Scenario, ShadingModel};

#[cfg(feature = "export")]
pub use bridge::{BodyTransform, EventRecord, TransformBuffer};
