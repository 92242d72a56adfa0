pub mod geometry;
pub mod motion;
pub mod pocket;
pub mod registry;
pub mod resolver;
pub mod rng;
pub mod simulation;
pub mod time;
