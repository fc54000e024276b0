//! Unit tests for the task module.
//!
//! Tests are organised by concern: entity rules, list query behaviour, and
//! command and query orchestration.

mod support;
