// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Process-wide bring-up and teardown.
//!
//! [`init_system`] creates the hardware-abstraction context with a log
//! handler that drops every record. [`cleanup_system`] consumes the context
//! and leaves the A53 with both caches disabled and invalidated.

mod cache;


use log::{LevelFilter, Log, Metadata, Record};

#[cfg(target_arch = "aarch64")]
pub use cache::Aarch64Caches;
pub use cache::CacheControl;
#[cfg(any(test, feature = "std"))]
pub use cache::{CacheOp, RecordingCaches};

use crate::metal::{DeviceRegistry, Metal, MetalInitParams};

/// Minimum severity configured by [`init_system`].
pub const SYSTEM_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Log handler that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardLogger;

impl Log for DiscardLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _record: &Record<'_>) {}

    fn flush(&self) {}
}

static DISCARD_LOGGER: DiscardLogger = DiscardLogger;

/// Bring the hardware-abstraction layer up.
///
/// The returned context must be handed back to [`cleanup_system`] once all
/// remoteproc activity has ended.
#[must_use]
pub fn init_system(devices: DeviceRegistry) -> Metal {
    Metal::init(
        MetalInitParams {
            log_handler: &DISCARD_LOGGER,
            log_level: SYSTEM_LOG_LEVEL,
        },
        devices,
    )
}

/// Tear the hardware-abstraction layer down, then disable and invalidate the
/// caches.
///
/// Order: disable D-cache, disable I-cache, invalidate D-cache, invalidate
/// I-cache. Returns the device registry left behind by the context.
pub fn cleanup_system<C: CacheControl>(metal: Metal, caches: &mut C) -> DeviceRegistry {
    let devices = metal.finish();
    caches.disable_dcache();
    caches.disable_icache();
    caches.invalidate_dcache();
    caches.invalidate_icache();
    devices
}
