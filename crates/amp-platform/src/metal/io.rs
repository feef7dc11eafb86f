// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Addressable I/O regions.
//!
//! An [`IoRegion`] is a window of `size` bytes that is reachable at a virtual
//! base address from the A53 and corresponds to a contiguous physical range.
//! All accesses are volatile and bounds-checked against the window.

use core::ptr::{read_volatile, write_volatile};

use amp_abi::{IoAttr, Paddr, Vaddr};

use super::MetalError;

/// Descriptor of an addressable I/O region.
///
/// The descriptor is `Copy`: it does not own the memory it describes. The
/// safety contract of [`IoRegion::new`] keeps every copy valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IoRegion {
    virt: Vaddr,
    phys: Paddr,
    size: usize,
    page_shift: u32,
    attr: IoAttr,
}

impl IoRegion {
    /// Describe an I/O region.
    ///
    /// # Safety
    ///
    /// `virt .. virt + size` must stay valid for volatile 32- and 64-bit
    /// accesses for as long as any copy of the returned descriptor is used to
    /// read or write. A descriptor that is only used for address translation
    /// may describe memory that is not mapped.
    #[must_use]
    pub const unsafe fn new(
        virt: Vaddr,
        phys: Paddr,
        size: usize,
        page_shift: u32,
        attr: IoAttr,
    ) -> Self {
        Self {
            virt,
            phys,
            size,
            page_shift,
            attr,
        }
    }

    /// Virtual base address.
    #[inline]
    #[must_use]
    pub const fn virt(&self) -> Vaddr {
        self.virt
    }

    /// Physical base address.
    #[inline]
    #[must_use]
    pub const fn phys(&self) -> Paddr {
        self.phys
    }

    /// Size of the region in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// log2 of the translation granule covering this region.
    #[inline]
    #[must_use]
    pub const fn page_shift(&self) -> u32 {
        self.page_shift
    }

    /// Memory attributes.
    #[inline]
    #[must_use]
    pub const fn attr(&self) -> IoAttr {
        self.attr
    }

    /// Virtual address of a byte offset, or `None` outside the region.
    #[must_use]
    pub fn offset_to_virt(&self, offset: usize) -> Option<Vaddr> {
        if offset >= self.size {
            return None;
        }
        self.virt.checked_add(offset as u64)
    }

    /// Byte offset of a virtual address, or `None` outside the region.
    #[must_use]
    pub fn virt_to_offset(&self, va: Vaddr) -> Option<usize> {
        let offset = usize::try_from(va.offset_from(self.virt)?).ok()?;
        (offset < self.size).then_some(offset)
    }

    /// Translate a physical address inside the region to its virtual address.
    #[must_use]
    pub fn phys_to_virt(&self, pa: Paddr) -> Option<Vaddr> {
        let offset = usize::try_from(pa.offset_from(self.phys)?).ok()?;
        self.offset_to_virt(offset)
    }

    /// Translate a virtual address inside the region to its physical address.
    #[must_use]
    pub fn virt_to_phys(&self, va: Vaddr) -> Option<Paddr> {
        let offset = self.virt_to_offset(va)?;
        self.phys.checked_add(offset as u64)
    }

    /// Read a 32-bit word at a byte offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the access falls outside the region or is not
    /// naturally aligned.
    pub fn read32(&self, offset: usize) -> Result<u32, MetalError> {
        let ptr = self.access_ptr::<u32>(offset)?;
        // SAFETY: bounds and alignment checked; validity guaranteed by `new`.
        Ok(unsafe { read_volatile(ptr) })
    }

    /// Write a 32-bit word at a byte offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the access falls outside the region or is not
    /// naturally aligned.
    pub fn write32(&self, offset: usize, value: u32) -> Result<(), MetalError> {
        let ptr = self.access_ptr::<u32>(offset)?;
        // SAFETY: bounds and alignment checked; validity guaranteed by `new`.
        unsafe { write_volatile(ptr, value) };
        Ok(())
    }

    /// Read a 64-bit word at a byte offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the access falls outside the region or is not
    /// naturally aligned.
    pub fn read64(&self, offset: usize) -> Result<u64, MetalError> {
        let ptr = self.access_ptr::<u64>(offset)?;
        // SAFETY: bounds and alignment checked; validity guaranteed by `new`.
        Ok(unsafe { read_volatile(ptr) })
    }

    /// Write a 64-bit word at a byte offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the access falls outside the region or is not
    /// naturally aligned.
    pub fn write64(&self, offset: usize, value: u64) -> Result<(), MetalError> {
        let ptr = self.access_ptr::<u64>(offset)?;
        // SAFETY: bounds and alignment checked; validity guaranteed by `new`.
        unsafe { write_volatile(ptr, value) };
        Ok(())
    }

    /// Pointer for an access of `size_of::<T>()` bytes at `offset`.
    fn access_ptr<T>(&self, offset: usize) -> Result<*mut T, MetalError> {
        let width = core::mem::size_of::<T>();
        let end = offset.checked_add(width).ok_or(MetalError::OutOfRange)?;
        if end > self.size {
            return Err(MetalError::OutOfRange);
        }
        let va = self
            .virt
            .checked_add(offset as u64)
            .ok_or(MetalError::OutOfRange)?;
        if va.as_u64() % width as u64 != 0 {
            return Err(MetalError::Misaligned);
        }
        Ok(va.as_mut_ptr::<T>())
    }
}
