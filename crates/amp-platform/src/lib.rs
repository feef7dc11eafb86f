// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # AMP Platform
//!
//! ZynqMP A53 platform port for the remoteproc link to the R5 core.
//!
//! This crate plugs the board into the remoteproc framework. It:
//! - Provides the hardware-abstraction context (devices, I/O regions, logging)
//! - Implements the processor operations for the R5 (init, remove, mmap, notify)
//! - Brings the hardware-abstraction layer up and tears it down with the caches
//!
//! # Usage
//!
//! ```ignore
//! let mut devices = DeviceRegistry::new();
//! // SAFETY: the poll device is identity mapped by the boot translation tables
//! unsafe { platform_info::register_kick_device(&mut devices)? };
//! let mut metal = system::init_system(devices);
//!
//! let mut rproc = Remoteproc::<R5Proc>::new();
//! rproc.init(&mut metal, Some(KickConfig::default()))?;
//! rproc.notify(0)?;
//! rproc.remove(&mut metal);
//!
//! // SAFETY: running at EL1, nothing depends on cached memory past this point
//! let mut caches = unsafe { Aarch64Caches::new() };
//! system::cleanup_system(metal, &mut caches);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod machine;
pub mod metal;
pub mod remoteproc;
pub mod system;

#[cfg(test)]
mod testing;

pub use machine::zynqmp_a53::{KickConfig, R5Proc};
pub use metal::{DeviceRegistry, IoRegion, Metal, MetalError};
pub use remoteproc::{Mapping, MmapRequest, Remoteproc, RemoteprocOps, RprocError};

/// Crate version.
pub const VERSION: &str = match option_env!("AMP_VERSION") {
    Some(v) => v,
    None => "unknown",
};
