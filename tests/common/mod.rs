//! Common test utilities for CLI tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated temp tree plus helpers to run the binary
//! - `TestResult`: captured exit code and output

#![allow(dead_code)]

pub mod env;

pub use env::*;
