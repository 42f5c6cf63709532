// Run orchestration and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::RunCoordinator;
pub use summary::RunSummary;
