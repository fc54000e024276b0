//! In-memory adapter implementations.
//!
//! These adapters keep everything in process memory. They back the default
//! server storage mode and every test that does not need a database.

mod clock;
mod directory;
mod ids;
mod task;

pub use clock::ManualClock;
pub use directory::InMemoryDirectory;
pub use ids::SequentialIdGenerator;
pub use task::InMemoryTaskRepository;
