//! End-to-end tests for pulsemon
//!
//! This crate exists for its `tests/` directory, which drives the real
//! `receiver` and `sender` binaries as separate processes.
