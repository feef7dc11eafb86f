// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Memory regions shared with the remote processor.
//!
//! Every successful mmap produces one [`RemoteprocMem`]; the handle's
//! [`MemRegistry`] owns it from then on. Lookups by physical or device address
//! are what the framework uses to place vrings and buffers.

use alloc::vec::Vec;

use amp_abi::{IoAttr, Paddr, Vaddr};

use super::RprocError;
use crate::metal::IoRegion;

/// One mapped memory region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoteprocMem {
    /// Physical address of the first byte.
    pub pa: Paddr,
    /// Device address of the first byte (as seen by the remote core).
    pub da: Paddr,
    /// Size in bytes.
    pub size: usize,
    /// Memory attributes requested for the mapping.
    pub attr: IoAttr,
    /// I/O region through which the A53 reaches the memory.
    pub io: IoRegion,
}

impl RemoteprocMem {
    /// Returns true if `pa` lies inside the region.
    #[must_use]
    pub fn contains_pa(&self, pa: Paddr) -> bool {
        pa.offset_from(self.pa)
            .is_some_and(|offset| offset < self.size as u64)
    }

    /// Returns true if `da` lies inside the region.
    #[must_use]
    pub fn contains_da(&self, da: Paddr) -> bool {
        da.offset_from(self.da)
            .is_some_and(|offset| offset < self.size as u64)
    }
}

/// Registry of the regions mapped for one remote processor.
#[derive(Debug, Default)]
pub struct MemRegistry {
    mems: Vec<RemoteprocMem>,
    /// Maximum number of regions, `None` for unbounded.
    limit: Option<usize>,
}

impl MemRegistry {
    /// Creates an empty, unbounded registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mems: Vec::new(),
            limit: None,
        }
    }

    /// Creates an empty registry that refuses to hold more than `limit`
    /// regions, for platforms with a fixed region budget.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            mems: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Adds a region.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the registry is at its limit or cannot
    /// grow; the registry is unchanged in that case.
    pub fn try_add(&mut self, mem: RemoteprocMem) -> Result<(), RprocError> {
        if self.limit.is_some_and(|limit| self.mems.len() >= limit) {
            return Err(RprocError::AllocationFailure);
        }
        self.mems
            .try_reserve(1)
            .map_err(|_| RprocError::AllocationFailure)?;
        self.mems.push(mem);
        Ok(())
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mems.len()
    }

    /// Returns true if no region is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mems.is_empty()
    }

    /// Iterates regions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RemoteprocMem> {
        self.mems.iter()
    }

    /// Region containing a physical address.
    #[must_use]
    pub fn find_by_pa(&self, pa: Paddr) -> Option<&RemoteprocMem> {
        self.mems.iter().find(|mem| mem.contains_pa(pa))
    }

    /// Region containing a device address.
    #[must_use]
    pub fn find_by_da(&self, da: Paddr) -> Option<&RemoteprocMem> {
        self.mems.iter().find(|mem| mem.contains_da(da))
    }

    /// Virtual address of a physical address inside a registered region.
    #[must_use]
    pub fn pa_to_va(&self, pa: Paddr) -> Option<Vaddr> {
        self.find_by_pa(pa)?.io.phys_to_virt(pa)
    }

    /// Virtual address of a device address inside a registered region.
    #[must_use]
    pub fn da_to_va(&self, da: Paddr) -> Option<Vaddr> {
        let mem = self.find_by_da(da)?;
        let offset = usize::try_from(da.offset_from(mem.da)?).ok()?;
        mem.io.offset_to_virt(offset)
    }
}
