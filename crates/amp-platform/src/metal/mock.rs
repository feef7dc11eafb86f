// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock device memory for testing.
//!
//! Provides heap-backed device memory so the kick protocol and the region
//! accessors can be exercised on the host without real MMIO.

use core::ptr::{NonNull, read_volatile};

use amp_abi::{IoAttr, PHYS_ADDR_BITS, Paddr, Vaddr};
use std::boxed::Box;
use std::vec;

use super::io::IoRegion;

/// Device memory backed by a leaked heap buffer.
///
/// The buffer is leaked on purpose: region descriptors handed out by
/// [`MockDeviceMemory::region`] are `Copy` and may outlive the mock, so the
/// memory they point at must live for the rest of the process.
#[derive(Clone, Copy, Debug)]
pub struct MockDeviceMemory {
    base: NonNull<u64>,
    size: usize,
}

impl MockDeviceMemory {
    /// Allocate zeroed device memory of at least `size` bytes.
    ///
    /// The size is rounded up to a multiple of 8 bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let words = size.div_ceil(8).max(1);
        let buffer: &'static mut [u64] = Box::leak(vec![0u64; words].into_boxed_slice());
        Self {
            base: NonNull::from(buffer).cast::<u64>(),
            size,
        }
    }

    /// Virtual address of the first byte.
    #[must_use]
    pub fn base(&self) -> Vaddr {
        Vaddr::from_ptr(self.base.as_ptr().cast_const())
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Describe this memory as an I/O region located at `phys`.
    #[must_use]
    pub fn region(&self, phys: Paddr, attr: IoAttr) -> IoRegion {
        // SAFETY: the backing buffer is leaked and never freed.
        unsafe { IoRegion::new(self.base(), phys, self.size, PHYS_ADDR_BITS, attr) }
    }

    /// Read a 32-bit word directly from the backing memory.
    ///
    /// Returns `None` for out-of-bounds or misaligned offsets.
    #[must_use]
    pub fn peek32(&self, offset: usize) -> Option<u32> {
        if offset % 4 != 0 || offset.checked_add(4)? > self.size {
            return None;
        }
        let ptr = self.base.as_ptr().cast::<u8>().wrapping_add(offset);
        // SAFETY: in bounds of the leaked buffer, 4-byte aligned.
        Some(unsafe { read_volatile(ptr.cast::<u32>()) })
    }
}
