//! Common test utilities for shaderfuzz-ir
//!
//! Shader fixtures shared by the integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
