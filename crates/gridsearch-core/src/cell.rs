//! The [`Cell`] type: a traversal weight plus state [`Flags`].

use std::ops::{BitAnd, BitOr};

/// Smallest weight a cell can carry.
pub const MIN_WEIGHT: u8 = 1;
/// Largest weight a cell can carry.
pub const MAX_WEIGHT: u8 = 9;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// Bitmask of cell state flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags(pub u8);

impl Flags {
    pub const NONE: Self = Self(0);
    pub const WALL: Self = Self(1 << 0);
    pub const START: Self = Self(1 << 1);
    pub const END: Self = Self(1 << 2);
    pub const VISITED: Self = Self(1 << 3);
    pub const PATH: Self = Self(1 << 4);

    /// Flags owned by a single search run.
    pub const TRANSIENT: Self = Self(Self::VISITED.0 | Self::PATH.0);
    /// Start or end.
    pub const ENDPOINT: Self = Self(Self::START.0 | Self::END.0);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether this mask shares at least one bit with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for Flags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Flags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One addressable lattice position's data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Traversal cost in `[MIN_WEIGHT, MAX_WEIGHT]`.
    pub weight: u8,
    pub flags: Flags,
}

impl Cell {
    /// A flag-free cell with the given weight.
    #[inline]
    pub const fn with_weight(weight: u8) -> Self {
        Self {
            weight,
            flags: Flags::NONE,
        }
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        self.flags.contains(Flags::WALL)
    }

    #[inline]
    pub const fn is_endpoint(self) -> bool {
        self.flags.intersects(Flags::ENDPOINT)
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::with_weight(MIN_WEIGHT)
    }
}
