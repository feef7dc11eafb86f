// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Memory attributes for I/O regions.
//!
//! The attribute word is passed through to the translation-table setup of the
//! A53 standalone environment, so the encodings below are the lower
//! attribute bits of a stage 1 block descriptor.

use core::fmt;
use core::ops::BitOr;

/// Attribute word of an I/O region.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct IoAttr(u32);

impl IoAttr {
    /// No attributes (reserved / unmapped).
    pub const NONE: Self = Self(0);

    /// Normal memory, non-cacheable.
    pub const NORM_NONCACHE: Self = Self(0x401);

    /// Strongly ordered memory.
    pub const STRONG_ORDERED: Self = Self(0x409);

    /// Device memory.
    pub const DEVICE_MEMORY: Self = Self(0x40D);

    /// Normal memory, write-back cacheable.
    pub const NORM_WB_CACHE: Self = Self(0x705);

    /// Inner shareable.
    pub const INNER_SHAREABLE: Self = Self(0x3 << 8);

    /// Create an attribute word from its raw encoding.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw encoding.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check whether every bit of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for IoAttr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for IoAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IoAttr({:#x})", self.0)
    }
}
