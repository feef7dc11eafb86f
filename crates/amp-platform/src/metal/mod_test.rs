// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the hardware-abstraction layer context.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use amp_abi::{IoAttr, Paddr};
use log::{Level, LevelFilter};

use super::*;
use crate::testing::{CaptureLogger, capture_metal};

#[test]
fn metal_error_display() {
    assert_eq!(format!("{}", MetalError::NoDevice), "no such device");
    assert_eq!(format!("{}", MetalError::OutOfRange), "access outside I/O region");
}

#[test]
fn log_forwards_records_at_or_above_level() {
    let logger = CaptureLogger::leak();
    let params = MetalInitParams {
        log_handler: logger,
        log_level: LevelFilter::Info,
    };
    let metal = Metal::init(params, DeviceRegistry::new());

    metal.log(Level::Error, format_args!("bad {}", 1));
    metal.log(Level::Info, format_args!("info"));
    metal.log(Level::Debug, format_args!("hidden"));

    let records = logger.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], (Level::Error, "bad 1".to_string()));
    assert_eq!(records[1].0, Level::Info);
    assert!(!logger.contains("hidden"));
}

#[test]
fn log_level_can_be_raised() {
    let (mut metal, logger) = capture_metal(DeviceRegistry::new());
    metal.set_log_level(LevelFilter::Off);
    assert_eq!(metal.log_level(), LevelFilter::Off);

    metal.log(Level::Error, format_args!("dropped"));
    assert!(!logger.contains("dropped"));
}

#[test]
fn init_reports_device_count() {
    let mut devices = DeviceRegistry::new();
    devices.register(DeviceDesc::new("generic", "a")).unwrap();
    devices.register(DeviceDesc::new("generic", "b")).unwrap();

    let (_metal, logger) = capture_metal(devices);
    assert!(logger.contains("initialised with 2 device(s)"));
}

#[test]
fn device_round_trip_through_context() {
    let memory = MockDeviceMemory::new(64);
    let mut devices = DeviceRegistry::new();
    devices
        .register(
            DeviceDesc::new("generic", "poll_dev")
                .try_with_region(memory.region(Paddr::new(0x3EE4_0000), IoAttr::DEVICE_MEMORY))
                .unwrap(),
        )
        .unwrap();
    let (mut metal, _logger) = capture_metal(devices);

    let handle = metal.device_open("generic", "poll_dev").unwrap();
    let region = metal.device_io_region(handle, 0).unwrap();
    assert_eq!(region.phys(), Paddr::new(0x3EE4_0000));
    assert!(metal.devices().is_open("generic", "poll_dev"));

    metal.device_close(handle).unwrap();
    assert!(!metal.devices().is_open("generic", "poll_dev"));
}

#[test]
fn finish_returns_registry_and_flushes() {
    let mut devices = DeviceRegistry::new();
    devices.register(DeviceDesc::new("generic", "x")).unwrap();
    let (mut metal, logger) = capture_metal(devices);
    let _handle = metal.device_open("generic", "x").unwrap();

    let devices = metal.finish();
    assert_eq!(devices.len(), 1);
    // Finishing does not close devices behind the caller's back.
    assert_eq!(devices.open_count("generic", "x"), 1);
    assert!(logger.contains("finished"));
}

#[test]
fn late_registration() {
    let (mut metal, _logger) = capture_metal(DeviceRegistry::new());
    assert!(metal.device_open("generic", "late").is_err());

    metal
        .devices_mut()
        .register(DeviceDesc::new("generic", "late"))
        .unwrap();
    assert!(metal.device_open("generic", "late").is_ok());
}
