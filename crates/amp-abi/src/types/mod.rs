// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Address types shared by the remoteproc framework and the platform port.
//!
//! Device addresses (what the remote core sees) share the physical address
//! type: on this platform both sides of the link address the same bus.

mod addr;


pub use addr::{PHYS_ADDR_BITS, Paddr, Vaddr};
