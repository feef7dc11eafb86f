// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware-abstraction layer context.
//!
//! Everything the platform port needs from the hardware-abstraction layer
//! lives in one explicitly constructed [`Metal`] value instead of ambient
//! process-wide state:
//! - the log handler and its minimum level
//! - the device registry (named devices and their I/O regions)
//!
//! A process creates exactly one `Metal` at start-up (see
//! [`crate::system::init_system`]) and consumes it with [`Metal::finish`] at
//! shutdown. Operations that need the layer take it as `&mut Metal`.

mod device;
mod io;

#[cfg(any(test, feature = "std"))]
mod mock;

#[cfg(test)]
mod device_test;
#[cfg(test)]
mod mod_test;

use core::fmt;

use log::{Level, LevelFilter, Log, Record};

pub use device::{DeviceDesc, DeviceHandle, DeviceRegistry};
pub use io::IoRegion;
#[cfg(any(test, feature = "std"))]
pub use mock::MockDeviceMemory;

/// Log target used for records emitted through [`Metal::log`].
pub const LOG_TARGET: &str = "metal";

/// Errors reported by the hardware-abstraction layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetalError {
    /// No device registered under the requested bus and name.
    NoDevice,
    /// Device with the same bus and name already registered.
    AlreadyRegistered,
    /// Handle does not refer to an open device.
    NotOpen,
    /// Access outside the bounds of an I/O region.
    OutOfRange,
    /// Access not naturally aligned.
    Misaligned,
    /// Dynamic memory exhausted.
    OutOfMemory,
}

impl fmt::Display for MetalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice => write!(f, "no such device"),
            Self::AlreadyRegistered => write!(f, "device already registered"),
            Self::NotOpen => write!(f, "device not open"),
            Self::OutOfRange => write!(f, "access outside I/O region"),
            Self::Misaligned => write!(f, "misaligned I/O access"),
            Self::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

/// Parameters for [`Metal::init`].
#[derive(Clone, Copy)]
pub struct MetalInitParams {
    /// Handler receiving every record at or above `log_level`.
    pub log_handler: &'static dyn Log,
    /// Minimum severity forwarded to the handler.
    pub log_level: LevelFilter,
}

/// Hardware-abstraction layer context.
pub struct Metal {
    log_handler: &'static dyn Log,
    log_level: LevelFilter,
    devices: DeviceRegistry,
}

impl Metal {
    /// Initialise the layer with a log configuration and the platform devices.
    #[must_use]
    pub fn init(params: MetalInitParams, devices: DeviceRegistry) -> Self {
        let metal = Self {
            log_handler: params.log_handler,
            log_level: params.log_level,
            devices,
        };
        metal.log(
            Level::Debug,
            format_args!("initialised with {} device(s)", metal.devices.len()),
        );
        metal
    }

    /// Tear the layer down, flushing the log handler.
    ///
    /// Returns the device registry so callers can inspect what was left open.
    pub fn finish(self) -> DeviceRegistry {
        self.log(Level::Debug, format_args!("finished"));
        self.log_handler.flush();
        self.devices
    }

    /// Minimum severity forwarded to the log handler.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Change the minimum severity forwarded to the log handler.
    pub const fn set_log_level(&mut self, level: LevelFilter) {
        self.log_level = level;
    }

    /// Emit a log record through the configured handler.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if level > self.log_level {
            return;
        }
        self.log_handler.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(LOG_TARGET)
                .build(),
        );
    }

    /// Device registry.
    #[must_use]
    pub const fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    /// Mutable device registry (for late registration).
    pub const fn devices_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.devices
    }

    /// Open a device by bus and name.
    ///
    /// # Errors
    ///
    /// Returns `NoDevice` if no such device is registered.
    pub fn device_open(&mut self, bus: &str, name: &str) -> Result<DeviceHandle, MetalError> {
        self.devices.open(bus, name)
    }

    /// Close an open device.
    ///
    /// # Errors
    ///
    /// Returns `NotOpen` if the handle does not refer to an open device.
    pub fn device_close(&mut self, handle: DeviceHandle) -> Result<(), MetalError> {
        self.devices.close(handle)
    }

    /// I/O region `index` of an open device.
    #[must_use]
    pub fn device_io_region(&self, handle: DeviceHandle, index: usize) -> Option<IoRegion> {
        self.devices.io_region(handle, index)
    }
}
