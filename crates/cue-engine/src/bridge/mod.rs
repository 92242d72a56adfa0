pub mod transforms;

pub use transforms::{BodyTransform, EventRecord, TransformBuffer};
