//! Test fixtures for route-planner.
//!
//! Provides realistic test data including:
//! - Real Helsinki area locations (from OpenStreetMap)
//! - Stub geocoding and directions providers

#![allow(dead_code)]

pub mod helsinki_locations;
pub mod stubs;

pub use helsinki_locations::*;
pub use stubs::*;
