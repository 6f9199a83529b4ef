//! Test support utilities for the Resistance workspace.
//!
//! Provides unified logging initialization for integration tests.

pub mod logging;
