//! Error type shared by every geometry builder.

use crate::indices::IndexWidth;

/// Validation failures raised synchronously by the core builders.
///
/// None of these are retried; callers are expected to reject the triggering
/// event and keep whatever buffers they already had.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeightfieldError {
    #[error("invalid grid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    #[error("invalid color channel selector {0:?} (expected red, green or blue)")]
    InvalidChannelSelector(String),

    #[error("invalid topology selector {0:?} (expected triangle-strip, triangles, lines or points)")]
    InvalidTopologySelector(String),

    #[error("grid of {vertex_count} vertices does not fit {width} indices")]
    IndexRangeOverflow {
        vertex_count: u64,
        width: IndexWidth,
    },

    #[error("expected {expected} samples, got {actual}")]
    SampleCountMismatch { expected: u64, actual: u64 },

    #[error("cannot bound an empty point set")]
    EmptyPointSet,
}

impl HeightfieldError {
    #[cold]
    pub(crate) fn dims(width: u32, height: u32, reason: &'static str) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason,
        }
    }
}

pub type Result<T, E = HeightfieldError> = std::result::Result<T, E>;
