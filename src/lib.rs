//! Taskhub: a task and project tracking backend.
//!
//! Commands and queries over tasks are each bound to a single handler and
//! run against repository ports, so the same services work over process
//! memory, `PostgreSQL`, or test doubles.
//!
//! # Architecture
//!
//! Taskhub follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and identity
//! - **Adapters**: Concrete implementations of ports and the HTTP surface
//!
//! # Modules
//!
//! - [`config`]: Environment-driven server settings
//! - [`task`]: Tasks, projects, and the services that manage them

pub mod config;
pub mod task;
