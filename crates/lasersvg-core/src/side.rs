//! Side of a slit relative to its base segment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which flank of a slit a wall or outer segment sits on
///
/// `Left` is the side traversed before the base segment, `Right` the side
/// traversed after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Segments preceding the base
    Left,
    /// Segments following the base
    Right,
}

impl Side {
    /// Both sides, left first
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}
