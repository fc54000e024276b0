//! Adapter implementations for task ports.

pub mod http;
pub mod memory;
pub mod postgres;
