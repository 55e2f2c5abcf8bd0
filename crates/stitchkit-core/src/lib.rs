//! # Stitchkit Core
//!
//! Core types and utilities for the Stitchkit vector path engine.
//! Provides the geometric primitives, id generation, tuning constants,
//! and error types shared by the higher-level crates.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod id;

pub use error::{Result, VectorError};
pub use geometry::{closest_point_on_segment, Point};
pub use id::{AnchorId, IdGenerator, LayerId, PathId};
