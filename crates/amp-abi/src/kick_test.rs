// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the poll-flag protocol.

use super::{POLL_FLAG_OFFSET, PollFlag};

#[test]
fn poll_flag_values_are_stable() {
    // Both cores are built separately; these values are the wire contract.
    assert_eq!(PollFlag::Running.as_u32(), 0);
    assert_eq!(PollFlag::Stop.as_u32(), 1);
    assert_eq!(POLL_FLAG_OFFSET, 0);
}

#[test]
fn poll_flag_decode() {
    assert_eq!(PollFlag::from_u32(0), Some(PollFlag::Running));
    assert_eq!(PollFlag::from_u32(1), Some(PollFlag::Stop));
    assert_eq!(PollFlag::from_u32(2), None);
    assert_eq!(PollFlag::from_u32(u32::MAX), None);
}
