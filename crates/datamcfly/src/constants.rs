//! Named query constants
//!
//! Sort orders and profiling levels, serialised as their integer values.
//! No operation consumes them directly; they are available for building
//! command bodies.

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SortOrder {
    Ascending = 1,
    Descending = -1,
}

/// Database profiling level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ProfilingLevel {
    /// No database profiling
    Off = 0,
    /// Only profile slow operations
    SlowOnly = 1,
    /// Profile all operations
    All = 2,
}

pub const ASCENDING: SortOrder = SortOrder::Ascending;
pub const DESCENDING: SortOrder = SortOrder::Descending;

pub const OFF: ProfilingLevel = ProfilingLevel::Off;
pub const SLOW_ONLY: ProfilingLevel = ProfilingLevel::SlowOnly;
pub const ALL: ProfilingLevel = ProfilingLevel::All;

impl From<SortOrder> for i8 {
    fn from(order: SortOrder) -> Self {
        order as i8
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SortOrder::Ascending),
            -1 => Ok(SortOrder::Descending),
            other => Err(format!("invalid sort order {other} (expected 1 or -1)")),
        }
    }
}

impl From<ProfilingLevel> for u8 {
    fn from(level: ProfilingLevel) -> Self {
        level as u8
    }
}

impl TryFrom<u8> for ProfilingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProfilingLevel::Off),
            1 => Ok(ProfilingLevel::SlowOnly),
            2 => Ok(ProfilingLevel::All),
            other => Err(format!("invalid profiling level {other} (expected 0, 1 or 2)")),
        }
    }
}
