// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Remoteproc framework seam.
//!
//! The remoteproc framework drives a remote processor through a fixed set of
//! platform operations. Here that set is the [`RemoteprocOps`] trait:
//!
//! | Operation  | Required | Default            |
//! |------------|----------|--------------------|
//! | `init`     | yes      |                    |
//! | `remove`   | yes      |                    |
//! | `mmap`     | yes      |                    |
//! | `notify`   | yes      |                    |
//! | `start`    | no       | `Err(Unsupported)` |
//! | `stop`     | no       | `Err(Unsupported)` |
//! | `shutdown` | no       | `Err(Unsupported)` |
//!
//! A [`Remoteproc`] handle owns the attached operations (which carry the
//! platform's private state) and the registry of mapped regions. A handle
//! with nothing attached is *detached*: every operation on it either fails
//! with `InvalidArgument` or, for `remove`, does nothing.

mod mem;


use core::fmt;

use amp_abi::{IoAttr, Paddr, Vaddr};

pub use mem::{MemRegistry, RemoteprocMem};

use crate::metal::{IoRegion, Metal, MetalError};

/// Errors reported by remoteproc operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RprocError {
    /// A required argument is missing, or the handle is detached.
    InvalidArgument,
    /// The named hardware resource cannot be opened or lacks a region.
    DeviceUnavailable,
    /// Dynamic memory exhausted.
    AllocationFailure,
    /// The platform does not implement this operation.
    Unsupported,
}

impl RprocError {
    /// Negative errno-style code for callers bridging to C.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            Self::InvalidArgument => -22,
            Self::DeviceUnavailable => -19,
            Self::AllocationFailure => -12,
            Self::Unsupported => -38,
        }
    }
}

impl fmt::Display for RprocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::DeviceUnavailable => write!(f, "device unavailable"),
            Self::AllocationFailure => write!(f, "allocation failure"),
            Self::Unsupported => write!(f, "operation not supported"),
        }
    }
}

impl From<MetalError> for RprocError {
    fn from(err: MetalError) -> Self {
        match err {
            MetalError::OutOfMemory => Self::AllocationFailure,
            MetalError::NoDevice
            | MetalError::AlreadyRegistered
            | MetalError::NotOpen
            | MetalError::OutOfRange
            | MetalError::Misaligned => Self::DeviceUnavailable,
        }
    }
}

/// Life-cycle state of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RprocState {
    /// No operations attached.
    Offline,
    /// Operations attached; regions can be mapped and the peer notified.
    Ready,
}

/// Request to map a memory region.
///
/// `None` marks an address as unknown; the platform derives it from the other
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmapRequest {
    /// Physical address, if known.
    pub pa: Option<Paddr>,
    /// Device address, if known.
    pub da: Option<Paddr>,
    /// Size in bytes.
    pub size: usize,
    /// Memory attributes.
    pub attr: IoAttr,
}

/// Result of a successful mmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// Resolved physical address.
    pub pa: Paddr,
    /// Resolved device address.
    pub da: Paddr,
    /// Virtual address the A53 uses to reach `pa`.
    pub va: Vaddr,
    /// I/O region describing the mapping.
    pub io: IoRegion,
}

/// Platform operations for one remote processor.
///
/// The implementing type is the platform's private state; it is created by
/// [`RemoteprocOps::init`] and consumed by [`RemoteprocOps::remove`].
pub trait RemoteprocOps: Sized {
    /// Arguments needed to bring the platform state up.
    type Args;

    /// Acquire the platform resources.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource cannot be acquired. Anything acquired
    /// before the failure must be released again.
    fn init(metal: &mut Metal, args: Self::Args) -> Result<Self, RprocError>;

    /// Release the platform resources.
    fn remove(self, metal: &mut Metal);

    /// Map a memory region and register it in `mems`.
    ///
    /// # Safety
    ///
    /// The range the request resolves to must be mapped at the address the
    /// platform translates it to and stay valid for volatile access for as
    /// long as the returned [`Mapping::io`], or the region registered in
    /// `mems`, is used to read or write. A mapping only used for address
    /// translation may describe memory that is not mapped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be satisfied; `mems` is left
    /// unchanged in that case.
    unsafe fn mmap(
        &mut self,
        mems: &mut MemRegistry,
        request: MmapRequest,
    ) -> Result<Mapping, RprocError>;

    /// Signal the remote processor.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal cannot be delivered.
    fn notify(&mut self, id: u32) -> Result<(), RprocError>;

    /// Boot the remote processor.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` unless the platform controls the remote boot.
    fn start(&mut self) -> Result<(), RprocError> {
        Err(RprocError::Unsupported)
    }

    /// Halt the remote processor.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` unless the platform controls the remote core.
    fn stop(&mut self) -> Result<(), RprocError> {
        Err(RprocError::Unsupported)
    }

    /// Power the remote processor down.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` unless the platform controls remote power.
    fn shutdown(&mut self) -> Result<(), RprocError> {
        Err(RprocError::Unsupported)
    }
}

/// Handle for one remote processor.
pub struct Remoteproc<O> {
    ops: Option<O>,
    mems: MemRegistry,
    state: RprocState,
}

impl<O: RemoteprocOps> Remoteproc<O> {
    /// Creates a detached handle.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_mems(MemRegistry::new())
    }

    /// Creates a detached handle using the given region registry.
    #[must_use]
    pub const fn with_mems(mems: MemRegistry) -> Self {
        Self {
            ops: None,
            mems,
            state: RprocState::Offline,
        }
    }

    /// Current life-cycle state.
    #[must_use]
    pub const fn state(&self) -> RprocState {
        self.state
    }

    /// Returns true if platform operations are attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.ops.is_some()
    }

    /// Attached platform state.
    #[must_use]
    pub const fn ops(&self) -> Option<&O> {
        self.ops.as_ref()
    }

    /// Registry of mapped regions.
    #[must_use]
    pub const fn mems(&self) -> &MemRegistry {
        &self.mems
    }

    /// Bring the platform state up and attach it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `args` is missing or the handle is
    /// already attached, otherwise whatever the platform reports. Nothing is
    /// attached on failure.
    pub fn init(&mut self, metal: &mut Metal, args: Option<O::Args>) -> Result<(), RprocError> {
        let Some(args) = args else {
            return Err(RprocError::InvalidArgument);
        };
        if self.ops.is_some() {
            return Err(RprocError::InvalidArgument);
        }
        let ops = O::init(metal, args)?;
        self.ops = Some(ops);
        self.state = RprocState::Ready;
        Ok(())
    }

    /// Detach and release the platform state. No-op on a detached handle.
    pub fn remove(&mut self, metal: &mut Metal) {
        if let Some(ops) = self.ops.take() {
            ops.remove(metal);
            self.state = RprocState::Offline;
        }
    }

    /// Map a memory region for the remote processor.
    ///
    /// # Safety
    ///
    /// Same contract as [`RemoteprocOps::mmap`]: with the identity map of
    /// this platform, `pa .. pa + size` must be identity mapped and valid for
    /// volatile access whenever the returned region, or its entry in
    /// [`Remoteproc::mems`], is used to read or write.
    ///
    /// Mapping is only reachable from `unsafe` code:
    ///
    /// ```compile_fail
    /// # use amp_abi::{IoAttr, Paddr};
    /// # use amp_platform::{MmapRequest, R5Proc, Remoteproc};
    /// let mut rproc = Remoteproc::<R5Proc>::new();
    /// let _ = rproc.mmap(MmapRequest {
    ///     pa: Some(Paddr::new(0x10)),
    ///     da: None,
    ///     size: 0x100,
    ///     attr: IoAttr::NONE,
    /// });
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a detached handle, otherwise whatever the
    /// platform reports.
    pub unsafe fn mmap(&mut self, request: MmapRequest) -> Result<Mapping, RprocError> {
        let ops = self.ops.as_mut().ok_or(RprocError::InvalidArgument)?;
        // SAFETY: forwarded to the caller.
        unsafe { ops.mmap(&mut self.mems, request) }
    }

    /// Signal the remote processor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a detached handle, otherwise whatever the
    /// platform reports.
    pub fn notify(&mut self, id: u32) -> Result<(), RprocError> {
        self.attached_mut()?.notify(id)
    }

    /// Boot the remote processor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a detached handle, otherwise whatever the
    /// platform reports.
    pub fn start(&mut self) -> Result<(), RprocError> {
        self.attached_mut()?.start()
    }

    /// Halt the remote processor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a detached handle, otherwise whatever the
    /// platform reports.
    pub fn stop(&mut self) -> Result<(), RprocError> {
        self.attached_mut()?.stop()
    }

    /// Power the remote processor down.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a detached handle, otherwise whatever the
    /// platform reports.
    pub fn shutdown(&mut self) -> Result<(), RprocError> {
        self.attached_mut()?.shutdown()
    }

    fn attached_mut(&mut self) -> Result<&mut O, RprocError> {
        self.ops.as_mut().ok_or(RprocError::InvalidArgument)
    }
}

impl<O: RemoteprocOps> Default for Remoteproc<O> {
    fn default() -> Self {
        Self::new()
    }
}
