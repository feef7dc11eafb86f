// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the device registry.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use amp_abi::{IoAttr, Paddr};

use super::MetalError;
use super::device::{DeviceDesc, DeviceRegistry};
use super::mock::MockDeviceMemory;

fn registry_with(bus: &'static str, name: &'static str, regions: usize) -> DeviceRegistry {
    let mut desc = DeviceDesc::new(bus, name);
    for index in 0..regions {
        let memory = MockDeviceMemory::new(16);
        desc = desc
            .try_with_region(memory.region(Paddr::new(0x1000 * (index as u64 + 1)), IoAttr::NONE))
            .unwrap();
    }
    let mut registry = DeviceRegistry::new();
    registry.register(desc).unwrap();
    registry
}

#[test]
fn new_registry_is_empty() {
    let registry = DeviceRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert_eq!(registry.open_count("generic", "poll_dev"), 0);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = registry_with("generic", "poll_dev", 0);
    assert_eq!(
        registry.register(DeviceDesc::new("generic", "poll_dev")),
        Err(MetalError::AlreadyRegistered)
    );
    // Same name on another bus is a different device.
    assert_eq!(registry.register(DeviceDesc::new("platform", "poll_dev")), Ok(()));
    assert_eq!(registry.len(), 2);
}

#[test]
fn open_unknown_device_fails() {
    let mut registry = registry_with("generic", "poll_dev", 1);
    assert_eq!(registry.open("generic", "other"), Err(MetalError::NoDevice));
    assert_eq!(registry.open("platform", "poll_dev"), Err(MetalError::NoDevice));
    assert!(!registry.is_open("generic", "poll_dev"));
}

#[test]
fn open_and_close_track_count() {
    let mut registry = registry_with("generic", "poll_dev", 1);

    let first = registry.open("generic", "poll_dev").unwrap();
    let second = registry.open("generic", "poll_dev").unwrap();
    assert_eq!(registry.open_count("generic", "poll_dev"), 2);

    registry.close(first).unwrap();
    assert!(registry.is_open("generic", "poll_dev"));
    registry.close(second).unwrap();
    assert!(!registry.is_open("generic", "poll_dev"));

    assert_eq!(registry.close(first), Err(MetalError::NotOpen));
}

#[test]
fn io_regions_are_indexed_in_order() {
    let mut registry = registry_with("generic", "dev", 2);
    let handle = registry.open("generic", "dev").unwrap();

    assert_eq!(registry.io_region(handle, 0).unwrap().phys(), Paddr::new(0x1000));
    assert_eq!(registry.io_region(handle, 1).unwrap().phys(), Paddr::new(0x2000));
    assert!(registry.io_region(handle, 2).is_none());
}

#[test]
fn io_region_requires_open_device() {
    let mut registry = registry_with("generic", "dev", 1);
    let handle = registry.open("generic", "dev").unwrap();
    registry.close(handle).unwrap();
    assert!(registry.io_region(handle, 0).is_none());
}

#[test]
fn descriptor_accessors() {
    let memory = MockDeviceMemory::new(8);
    let desc = DeviceDesc::new("generic", "poll_dev")
        .try_with_region(memory.region(Paddr::new(0), IoAttr::NONE))
        .unwrap();
    assert_eq!(desc.bus(), "generic");
    assert_eq!(desc.name(), "poll_dev");
    assert_eq!(desc.region_count(), 1);
}

#[test]
fn try_with_region_appends_in_order() {
    let first = MockDeviceMemory::new(8);
    let second = MockDeviceMemory::new(8);
    let desc = DeviceDesc::new("generic", "dev")
        .try_with_region(first.region(Paddr::new(0x1000), IoAttr::NONE))
        .unwrap()
        .try_with_region(second.region(Paddr::new(0x2000), IoAttr::NONE))
        .unwrap();
    assert_eq!(desc.region_count(), 2);

    let mut registry = DeviceRegistry::new();
    registry.register(desc).unwrap();
    let handle = registry.open("generic", "dev").unwrap();
    assert_eq!(registry.io_region(handle, 1).unwrap().phys(), Paddr::new(0x2000));
}
