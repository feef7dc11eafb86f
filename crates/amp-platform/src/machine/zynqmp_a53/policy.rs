// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Address translation policy.
//!
//! The A53 runs with a flat identity map and both cores address shared memory
//! at the same bus address, so every translation here is the identity.
//! Platforms with a real translation supply their own [`AddressPolicy`]
//! without touching the adapter.

use amp_abi::{Paddr, Vaddr};

/// How physical, device and virtual addresses relate on a platform.
pub trait AddressPolicy {
    /// Fill in whichever of `pa` / `da` is unknown.
    ///
    /// Returns `None` if both are unknown.
    fn resolve(pa: Option<Paddr>, da: Option<Paddr>) -> Option<(Paddr, Paddr)>;

    /// Virtual address at which the A53 reaches `pa`.
    fn phys_to_virt(pa: Paddr) -> Vaddr;
}

/// Identity mapping: device address == physical address == virtual address.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMap;

impl AddressPolicy for IdentityMap {
    fn resolve(pa: Option<Paddr>, da: Option<Paddr>) -> Option<(Paddr, Paddr)> {
        match (pa, da) {
            (Some(pa), Some(da)) => Some((pa, da)),
            (Some(pa), None) => Some((pa, pa)),
            (None, Some(da)) => Some((da, da)),
            (None, None) => None,
        }
    }

    fn phys_to_virt(pa: Paddr) -> Vaddr {
        Vaddr::new(pa.as_u64())
    }
}
