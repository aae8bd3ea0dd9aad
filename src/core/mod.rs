//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified action model (Action, Report)
//! - Rendering functions for different output formats
//! - Per-item error type
//! - Path and content helpers
//! - Logging setup

pub mod error;
pub mod logging;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
