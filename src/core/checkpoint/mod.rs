// Checkpoint naming and persistence

pub mod name;
pub mod store;

pub use name::CheckpointName;
pub use store::CheckpointStore;
