// setup/mod.rs
//
// Built-in content: ball catalog, rack layout, tables and scenarios.
// Nothing in here runs during a step.

pub mod catalog;
pub mod rack;
pub mod shuffle;
pub mod tables;

pub use catalog::{BallDef, BallType, ShadingModel, BALLS};
pub use rack::RackLayout;
pub use shuffle::{shuffle_parallel, Column};
pub use tables::{collision_lab, standard_rack, standard_table, Scenario};
