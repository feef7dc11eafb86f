// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! ZynqMP A53 host, R5 remote.
//!
//! The R5 is booted and owned by its own firmware, so this port implements
//! only init, remove, mmap and notify. Notification has no interrupt behind
//! it: the R5 polls the kick word of the poll device (see
//! [`amp_abi::kick`]).

pub mod platform_info;
pub mod policy;


use core::marker::PhantomData;

use amp_abi::kick::POLL_FLAG_OFFSET;
use amp_abi::{PHYS_ADDR_BITS, PollFlag};
use log::Level;

use crate::metal::{DeviceHandle, IoRegion, Metal};
use crate::remoteproc::{
    Mapping, MemRegistry, MmapRequest, RemoteprocMem, RemoteprocOps, RprocError,
};

pub use policy::{AddressPolicy, IdentityMap};

/// Where to find the kick device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KickConfig {
    /// Bus name.
    pub bus: &'static str,
    /// Device name.
    pub device: &'static str,
}

impl Default for KickConfig {
    fn default() -> Self {
        Self {
            bus: platform_info::KICK_BUS_NAME,
            device: platform_info::KICK_DEV_NAME,
        }
    }
}

/// Private state of the R5 remote processor.
pub struct R5Proc<P = IdentityMap> {
    config: KickConfig,
    kick_dev: DeviceHandle,
    kick_io: IoRegion,
    policy: PhantomData<P>,
}

impl<P> R5Proc<P> {
    /// Kick device configuration this state was created from.
    #[must_use]
    pub const fn config(&self) -> KickConfig {
        self.config
    }

    /// I/O region holding the kick word.
    #[must_use]
    pub const fn kick_io(&self) -> IoRegion {
        self.kick_io
    }
}

impl<P: AddressPolicy> RemoteprocOps for R5Proc<P> {
    type Args = KickConfig;

    fn init(metal: &mut Metal, args: KickConfig) -> Result<Self, RprocError> {
        let kick_dev = match metal.device_open(args.bus, args.device) {
            Ok(handle) => handle,
            Err(err) => {
                metal.log(
                    Level::Error,
                    format_args!(
                        "failed to open polling device {}/{}: {err}",
                        args.bus, args.device
                    ),
                );
                return Err(RprocError::DeviceUnavailable);
            }
        };

        let armed = metal
            .device_io_region(kick_dev, 0)
            .ok_or(RprocError::DeviceUnavailable)
            .and_then(|kick_io| {
                kick_io
                    .write32(POLL_FLAG_OFFSET, PollFlag::Running.as_u32())
                    .map(|()| kick_io)
                    .map_err(RprocError::from)
            });

        match armed {
            Ok(kick_io) => Ok(Self {
                config: args,
                kick_dev,
                kick_io,
                policy: PhantomData,
            }),
            Err(err) => {
                metal.log(
                    Level::Error,
                    format_args!(
                        "polling device {}/{} has no usable region 0",
                        args.bus, args.device
                    ),
                );
                if let Err(close_err) = metal.device_close(kick_dev) {
                    metal.log(
                        Level::Warn,
                        format_args!("failed to close polling device: {close_err}"),
                    );
                }
                Err(err)
            }
        }
    }

    fn remove(self, metal: &mut Metal) {
        if let Err(err) = metal.device_close(self.kick_dev) {
            metal.log(
                Level::Warn,
                format_args!(
                    "failed to close polling device {}/{}: {err}",
                    self.config.bus, self.config.device
                ),
            );
        }
    }

    unsafe fn mmap(
        &mut self,
        mems: &mut MemRegistry,
        request: MmapRequest,
    ) -> Result<Mapping, RprocError> {
        let (pa, da) = P::resolve(request.pa, request.da).ok_or(RprocError::InvalidArgument)?;
        let va = P::phys_to_virt(pa);

        // SAFETY: the caller guarantees `va .. va + size` is valid whenever
        // the region is used for access.
        let io = unsafe { IoRegion::new(va, pa, request.size, PHYS_ADDR_BITS, request.attr) };

        mems.try_add(RemoteprocMem {
            pa,
            da,
            size: request.size,
            attr: request.attr,
            io,
        })?;

        Ok(Mapping { pa, da, va, io })
    }

    fn notify(&mut self, _id: u32) -> Result<(), RprocError> {
        self.kick_io
            .write32(POLL_FLAG_OFFSET, PollFlag::Stop.as_u32())
            .map_err(RprocError::from)
    }
}
