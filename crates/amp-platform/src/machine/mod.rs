// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Machine-specific platform ports.
//!
//! Each machine provides a [`crate::remoteproc::RemoteprocOps`]
//! implementation and the constants describing its devices and memory.

pub mod zynqmp_a53;
