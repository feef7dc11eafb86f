// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared helpers for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::boxed::Box;
use std::string::{String, ToString};
use std::sync::Mutex;
use std::vec::Vec;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::metal::{DeviceRegistry, Metal, MetalInitParams};

/// Logger that keeps every record it receives.
#[derive(Default)]
pub struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl CaptureLogger {
    /// Leak a fresh logger so it can be installed as a `&'static dyn Log`.
    pub fn leak() -> &'static Self {
        Box::leak(Box::new(Self::default()))
    }

    /// Snapshot of the captured records.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().unwrap().clone()
    }

    /// Returns true if any captured message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Metal context logging everything into a fresh capture logger.
pub fn capture_metal(devices: DeviceRegistry) -> (Metal, &'static CaptureLogger) {
    let logger = CaptureLogger::leak();
    let params = MetalInitParams {
        log_handler: logger,
        log_level: LevelFilter::Trace,
    };
    (Metal::init(params, devices), logger)
}
