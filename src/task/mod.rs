//! Task tracking.
//!
//! Tasks belong to projects, may be assigned to users, and collect comments
//! and attachments over their lifetime. Writes go through command handlers;
//! reads go through query handlers that filter, sort and page task lists.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Command and query services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
