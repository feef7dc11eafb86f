// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Poll-flag protocol of the kick device.
//!
//! The platform has no inter-core interrupt wired for remoteproc. Instead the
//! kick device exposes one 32-bit word at offset 0 of its first I/O region.
//! The remote core spins on that word:
//!
//! ```text
//! host init    -> writes Running (0)   remote keeps polling
//! host notify  -> writes Stop    (1)   remote stops polling, services vrings
//! ```
//!
//! The remote side owns resetting the word once it has consumed a kick.

#[cfg(test)]
#[path = "kick_test.rs"]
mod kick_test;

/// Byte offset of the poll word inside the kick region.
pub const POLL_FLAG_OFFSET: usize = 0;

/// Value of the 32-bit poll word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PollFlag {
    /// Remote core keeps polling; no pending kick.
    Running = 0,
    /// Remote core should stop polling and process its queues.
    Stop = 1,
}

impl PollFlag {
    /// Raw word written to the kick region.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Decode a raw poll word.
    ///
    /// Returns `None` for values neither side ever writes.
    #[inline]
    #[must_use]
    pub const fn from_u32(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Running),
            1 => Some(Self::Stop),
            _ => None,
        }
    }
}
