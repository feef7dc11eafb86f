// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Board constants for the ZynqMP A53 ⇄ R5 link.
//!
//! # Memory Map
//!
//! ```text
//! 0x3ED4_0000  Shared memory (vrings + buffers, 1 MB)
//! 0x3EE4_0000  Poll device   (kick word at offset 0, 4 KB)
//! ```
//!
//! Both ranges are carved out of DDR by the boot translation tables and are
//! identity mapped with non-cacheable attributes.

use amp_abi::{IoAttr, PHYS_ADDR_BITS, Paddr, Vaddr};

use super::policy::{AddressPolicy, IdentityMap};
use crate::metal::{DeviceDesc, DeviceRegistry, IoRegion, MetalError};

/// One kilobyte in bytes.
const KB: usize = 1024;

/// One megabyte in bytes.
const MB: usize = 1024 * KB;

/// Bus on which the poll device is registered.
pub const KICK_BUS_NAME: &str = "generic";

/// Name of the poll device.
pub const KICK_DEV_NAME: &str = "poll_dev";

/// Physical base of the poll device.
pub const POLL_BASE_ADDR: Paddr = Paddr::new(0x3EE4_0000);

/// Size of the poll device window.
pub const POLL_DEV_SIZE: usize = 4 * KB;

/// Attributes of the poll device window.
pub const POLL_DEV_ATTR: IoAttr = IoAttr::DEVICE_MEMORY;

/// Physical base of the shared memory carve-out.
pub const SHARED_MEM_PA: Paddr = Paddr::new(0x3ED4_0000);

/// Size of the shared memory carve-out.
pub const SHARED_MEM_SIZE: usize = MB;

/// Attributes of the shared memory carve-out.
pub const SHARED_MEM_ATTR: IoAttr = IoAttr::NORM_NONCACHE;

/// Describe the poll device at its fixed physical address.
///
/// # Safety
///
/// `POLL_BASE_ADDR .. POLL_BASE_ADDR + POLL_DEV_SIZE` must be identity mapped
/// and valid for volatile access for the rest of the program.
///
/// # Errors
///
/// Returns `OutOfMemory` if the descriptor cannot hold its region.
pub unsafe fn kick_device_desc() -> Result<DeviceDesc, MetalError> {
    let va: Vaddr = IdentityMap::phys_to_virt(POLL_BASE_ADDR);
    // SAFETY: caller guarantees the window is mapped.
    let region = unsafe {
        IoRegion::new(
            va,
            POLL_BASE_ADDR,
            POLL_DEV_SIZE,
            PHYS_ADDR_BITS,
            POLL_DEV_ATTR,
        )
    };
    DeviceDesc::new(KICK_BUS_NAME, KICK_DEV_NAME).try_with_region(region)
}

/// Register the poll device so the processor adapter can open it.
///
/// # Safety
///
/// Same contract as [`kick_device_desc`].
///
/// # Errors
///
/// Returns an error if the device is already registered or the registry
/// cannot grow.
pub unsafe fn register_kick_device(devices: &mut DeviceRegistry) -> Result<(), MetalError> {
    // SAFETY: forwarded to the caller.
    devices.register(unsafe { kick_device_desc() }?)
}
