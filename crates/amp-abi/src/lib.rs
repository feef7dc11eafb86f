// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared definitions between the A53 application core and the R5 remote core.
//!
//! This crate defines the contract both sides of the remoteproc link agree on:
//! - Address newtypes for physical, device and virtual addresses
//! - The poll-flag protocol used by the kick device
//! - I/O memory attribute words used when mapping shared regions
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **Stable layout**: Wire-visible values use `#[repr(u32)]` / `#[repr(transparent)]`
//! - **64-bit addresses**: Physical addresses are always carried as `u64`

#![cfg_attr(not(test), no_std)]

pub mod io;
pub mod kick;
pub mod types;

pub use io::IoAttr;
pub use kick::PollFlag;
pub use types::{PHYS_ADDR_BITS, Paddr, Vaddr};
