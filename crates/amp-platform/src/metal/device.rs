// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Device registry.
//!
//! Devices are identified by a `(bus, name)` pair and expose an ordered list
//! of I/O regions. The registry tracks how many times each device is open so
//! that leaks are observable.

use alloc::vec::Vec;

use super::MetalError;
use super::io::IoRegion;

/// Static description of a device.
#[derive(Clone, Debug)]
pub struct DeviceDesc {
    bus: &'static str,
    name: &'static str,
    regions: Vec<IoRegion>,
}

impl DeviceDesc {
    /// Describe a device without any I/O regions.
    #[must_use]
    pub const fn new(bus: &'static str, name: &'static str) -> Self {
        Self {
            bus,
            name,
            regions: Vec::new(),
        }
    }

    /// Append an I/O region; regions are indexed in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if the region list cannot grow.
    pub fn try_with_region(mut self, region: IoRegion) -> Result<Self, MetalError> {
        self.regions
            .try_reserve(1)
            .map_err(|_| MetalError::OutOfMemory)?;
        self.regions.push(region);
        Ok(self)
    }

    /// Bus name.
    #[must_use]
    pub const fn bus(&self) -> &'static str {
        self.bus
    }

    /// Device name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of I/O regions.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn matches(&self, bus: &str, name: &str) -> bool {
        self.bus == bus && self.name == name
    }
}

/// Handle to an open device.
///
/// Obtained from [`DeviceRegistry::open`] and given back with
/// [`DeviceRegistry::close`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceHandle(usize);

struct DeviceEntry {
    desc: DeviceDesc,
    open_count: usize,
}

/// Registry of devices known to the hardware-abstraction layer.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: Vec<DeviceEntry>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Registers a device.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if a device with the same bus and name
    /// exists, or `OutOfMemory` if the registry cannot grow.
    pub fn register(&mut self, desc: DeviceDesc) -> Result<(), MetalError> {
        if self.find(desc.bus, desc.name).is_some() {
            return Err(MetalError::AlreadyRegistered);
        }
        self.devices
            .try_reserve(1)
            .map_err(|_| MetalError::OutOfMemory)?;
        self.devices.push(DeviceEntry {
            desc,
            open_count: 0,
        });
        Ok(())
    }

    /// Opens a device by bus and name.
    ///
    /// # Errors
    ///
    /// Returns `NoDevice` if no such device is registered.
    pub fn open(&mut self, bus: &str, name: &str) -> Result<DeviceHandle, MetalError> {
        let index = self.find(bus, name).ok_or(MetalError::NoDevice)?;
        let entry = &mut self.devices[index];
        entry.open_count = entry.open_count.saturating_add(1);
        Ok(DeviceHandle(index))
    }

    /// Closes a previously opened device.
    ///
    /// # Errors
    ///
    /// Returns `NotOpen` if the handle does not refer to an open device.
    pub fn close(&mut self, handle: DeviceHandle) -> Result<(), MetalError> {
        let entry = self
            .devices
            .get_mut(handle.0)
            .filter(|entry| entry.open_count > 0)
            .ok_or(MetalError::NotOpen)?;
        entry.open_count -= 1;
        Ok(())
    }

    /// Returns I/O region `index` of an open device.
    #[must_use]
    pub fn io_region(&self, handle: DeviceHandle, index: usize) -> Option<IoRegion> {
        let entry = self.devices.get(handle.0)?;
        if entry.open_count == 0 {
            return None;
        }
        entry.desc.regions.get(index).copied()
    }

    /// Number of outstanding opens of a device (0 if unknown).
    #[must_use]
    pub fn open_count(&self, bus: &str, name: &str) -> usize {
        self.find(bus, name)
            .map_or(0, |index| self.devices[index].open_count)
    }

    /// Returns true if the device is currently open.
    #[must_use]
    pub fn is_open(&self, bus: &str, name: &str) -> bool {
        self.open_count(bus, name) > 0
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns true if no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn find(&self, bus: &str, name: &str) -> Option<usize> {
        self.devices
            .iter()
            .position(|entry| entry.desc.matches(bus, name))
    }
}
