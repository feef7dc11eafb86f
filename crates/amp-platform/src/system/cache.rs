// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Cache control for the application processor.
//!
//! # Data cache maintenance
//!
//! Whole-cache maintenance walks every level reported by `CLIDR_EL1` up to
//! the level of coherency and issues one set/way operation per line:
//! - **Disable**: clear `SCTLR_EL1.C`, then clean and invalidate (DC CISW)
//! - **Invalidate**: discard every line (DC ISW)
//!
//! Set/way operations are local to the executing core. They are only a
//! correct way to empty the caches when no other core shares them, which
//! holds at teardown of a single-core A53 application.

#[cfg(any(test, feature = "std"))]
use alloc::vec::Vec;

/// Whole-cache operations used at teardown.
pub trait CacheControl {
    /// Stop allocating into the data cache, writing dirty lines back.
    fn disable_dcache(&mut self);

    /// Stop allocating into the instruction cache.
    fn disable_icache(&mut self);

    /// Discard every data cache line.
    fn invalidate_dcache(&mut self);

    /// Discard every instruction cache line.
    fn invalidate_icache(&mut self);
}

/// Caches of the executing A53 core, controlled through EL1 registers.
#[cfg(target_arch = "aarch64")]
#[derive(Debug)]
pub struct Aarch64Caches {
    _private: (),
}

#[cfg(target_arch = "aarch64")]
impl Aarch64Caches {
    /// Take control of the executing core's caches.
    ///
    /// # Safety
    ///
    /// Must run at EL1 with nothing else relying on cached memory for the
    /// rest of the program.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "aarch64")]
mod aarch64 {
    use core::arch::asm;

    use aarch64_cpu::asm::barrier;
    use aarch64_cpu::registers::SCTLR_EL1;
    use tock_registers::interfaces::ReadWriteable;

    use super::{Aarch64Caches, CacheControl};

    /// Data cache set/way operation.
    #[derive(Clone, Copy)]
    enum SetWayOp {
        CleanInvalidate,
        Invalidate,
    }

    fn read_clidr() -> u64 {
        let clidr: u64;
        // SAFETY: reading CLIDR_EL1 has no side effects.
        unsafe {
            asm!("mrs {}, clidr_el1", out(reg) clidr, options(nomem, nostack, preserves_flags));
        }
        clidr
    }

    /// Select a data cache level and read its geometry.
    fn read_ccsidr(level: u64) -> u64 {
        let ccsidr: u64;
        // SAFETY: CSSELR_EL1 only selects which CCSIDR_EL1 is visible.
        unsafe {
            asm!("msr csselr_el1, {}", in(reg) level << 1, options(nostack, preserves_flags));
        }
        barrier::isb(barrier::SY);
        // SAFETY: reading CCSIDR_EL1 has no side effects.
        unsafe {
            asm!("mrs {}, ccsidr_el1", out(reg) ccsidr, options(nomem, nostack, preserves_flags));
        }
        ccsidr
    }

    fn for_each_set_way(op: SetWayOp) {
        let clidr = read_clidr();
        let level_of_coherency = (clidr >> 24) & 0x7;

        for level in 0..level_of_coherency {
            // Ctype 2 and above have a data or unified cache at this level.
            let ctype = (clidr >> (level * 3)) & 0x7;
            if ctype < 2 {
                continue;
            }

            let ccsidr = read_ccsidr(level);
            let line_shift = (ccsidr & 0x7) + 4;
            let ways = ((ccsidr >> 3) & 0x3FF) + 1;
            let sets = ((ccsidr >> 13) & 0x7FFF) + 1;
            // Way index sits in the top bits of the 32-bit operand.
            let way_shift = u32::try_from(ways - 1).map_or(0, u32::leading_zeros);

            for way in 0..ways {
                for set in 0..sets {
                    let operand = (way << way_shift) | (set << line_shift) | (level << 1);
                    // SAFETY: operand encodes a valid level/set/way triple.
                    unsafe {
                        match op {
                            SetWayOp::CleanInvalidate => {
                                asm!("dc cisw, {}", in(reg) operand, options(nostack));
                            }
                            SetWayOp::Invalidate => {
                                asm!("dc isw, {}", in(reg) operand, options(nostack));
                            }
                        }
                    }
                }
            }
        }

        barrier::dsb(barrier::SY);
        barrier::isb(barrier::SY);
    }

    impl CacheControl for Aarch64Caches {
        fn disable_dcache(&mut self) {
            barrier::dsb(barrier::SY);
            SCTLR_EL1.modify(SCTLR_EL1::C::NonCacheable);
            barrier::isb(barrier::SY);
            for_each_set_way(SetWayOp::CleanInvalidate);
        }

        fn disable_icache(&mut self) {
            SCTLR_EL1.modify(SCTLR_EL1::I::NonCacheable);
            barrier::isb(barrier::SY);
        }

        fn invalidate_dcache(&mut self) {
            for_each_set_way(SetWayOp::Invalidate);
        }

        fn invalidate_icache(&mut self) {
            // SAFETY: invalidating the instruction cache never loses data.
            unsafe {
                asm!("ic iallu", options(nostack));
            }
            barrier::dsb(barrier::SY);
            barrier::isb(barrier::SY);
        }
    }
}

/// One cache operation, as seen by [`RecordingCaches`].
#[cfg(any(test, feature = "std"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOp {
    /// [`CacheControl::disable_dcache`]
    DisableDcache,
    /// [`CacheControl::disable_icache`]
    DisableIcache,
    /// [`CacheControl::invalidate_dcache`]
    InvalidateDcache,
    /// [`CacheControl::invalidate_icache`]
    InvalidateIcache,
}

/// Cache control that only records what it was asked to do.
#[cfg(any(test, feature = "std"))]
#[derive(Debug, Default)]
pub struct RecordingCaches {
    ops: Vec<CacheOp>,
}

#[cfg(any(test, feature = "std"))]
impl RecordingCaches {
    /// Creates a recorder with no operations.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Operations in the order they were issued.
    #[must_use]
    pub fn ops(&self) -> &[CacheOp] {
        &self.ops
    }
}

#[cfg(any(test, feature = "std"))]
impl CacheControl for RecordingCaches {
    fn disable_dcache(&mut self) {
        self.ops.push(CacheOp::DisableDcache);
    }

    fn disable_icache(&mut self) {
        self.ops.push(CacheOp::DisableIcache);
    }

    fn invalidate_dcache(&mut self) {
        self.ops.push(CacheOp::InvalidateDcache);
    }

    fn invalidate_icache(&mut self) {
        self.ops.push(CacheOp::InvalidateIcache);
    }
}
