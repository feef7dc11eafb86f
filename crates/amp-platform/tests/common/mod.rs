// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared test infrastructure for integration tests.
//!
//! [`TestBoard`] stands in for the ZynqMP: the poll device is backed by heap
//! memory instead of MMIO, registered under the platform's bus and name.
//!
//! This module is **not** a test file, so it must comply with full clippy rules.

use amp_platform::machine::zynqmp_a53::platform_info::{
    KICK_BUS_NAME, KICK_DEV_NAME, POLL_BASE_ADDR, POLL_DEV_ATTR, POLL_DEV_SIZE,
};
use amp_platform::metal::{DeviceDesc, MockDeviceMemory};
use amp_platform::{DeviceRegistry, MetalError};

/// Host stand-in for the board's device memory.
pub struct TestBoard {
    kick: MockDeviceMemory,
}

impl Default for TestBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBoard {
    /// Create a board with a zeroed poll device.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kick: MockDeviceMemory::new(POLL_DEV_SIZE),
        }
    }

    /// Device registry holding the poll device.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot grow.
    pub fn devices(&self) -> Result<DeviceRegistry, MetalError> {
        let mut devices = DeviceRegistry::new();
        devices.register(
            DeviceDesc::new(KICK_BUS_NAME, KICK_DEV_NAME)
                .try_with_region(self.kick.region(POLL_BASE_ADDR, POLL_DEV_ATTR))?,
        )?;
        Ok(devices)
    }

    /// Current value of the kick word.
    #[must_use]
    pub fn kick_word(&self) -> Option<u32> {
        self.kick.peek32(0)
    }
}
