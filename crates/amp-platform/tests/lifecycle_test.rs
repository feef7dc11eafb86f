// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! End-to-end life-cycle of the R5 link: bring-up, kick, teardown.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use amp_abi::{IoAttr, Paddr, PollFlag};
use amp_platform::machine::zynqmp_a53::platform_info::{
    KICK_BUS_NAME, KICK_DEV_NAME, SHARED_MEM_ATTR, SHARED_MEM_PA, SHARED_MEM_SIZE,
};
use amp_platform::remoteproc::RprocState;
use amp_platform::system::{self, CacheOp, RecordingCaches};
use amp_platform::{KickConfig, MmapRequest, R5Proc, Remoteproc, RprocError};
use common::TestBoard;

#[test]
fn full_lifecycle() {
    let board = TestBoard::new();
    let mut metal = system::init_system(board.devices().unwrap());

    let mut rproc = Remoteproc::<R5Proc>::new();
    rproc.init(&mut metal, Some(KickConfig::default())).unwrap();
    assert_eq!(rproc.state(), RprocState::Ready);
    assert_eq!(board.kick_word(), Some(PollFlag::Running.as_u32()));

    // SAFETY: the shared memory is only used for address translation here.
    let mapping = unsafe {
        rproc.mmap(MmapRequest {
            pa: Some(SHARED_MEM_PA),
            da: None,
            size: SHARED_MEM_SIZE,
            attr: SHARED_MEM_ATTR,
        })
    }
    .unwrap();
    assert_eq!(mapping.da, SHARED_MEM_PA);
    assert_eq!(rproc.mems().len(), 1);

    rproc.notify(0).unwrap();
    assert_eq!(board.kick_word(), Some(PollFlag::Stop.as_u32()));

    rproc.remove(&mut metal);
    assert!(!metal.devices().is_open(KICK_BUS_NAME, KICK_DEV_NAME));

    let mut caches = RecordingCaches::new();
    let devices = system::cleanup_system(metal, &mut caches);
    assert!(!devices.is_open(KICK_BUS_NAME, KICK_DEV_NAME));
    assert_eq!(
        caches.ops(),
        &[
            CacheOp::DisableDcache,
            CacheOp::DisableIcache,
            CacheOp::InvalidateDcache,
            CacheOp::InvalidateIcache,
        ]
    );
}

#[test]
fn missing_kick_device_fails_init() {
    let mut metal = system::init_system(amp_platform::DeviceRegistry::new());
    let mut rproc = Remoteproc::<R5Proc>::new();

    let err = rproc.init(&mut metal, Some(KickConfig::default())).unwrap_err();

    assert_eq!(err, RprocError::DeviceUnavailable);
    assert!(err.errno() < 0);
    assert!(!rproc.is_attached());
}

#[test]
fn removed_handle_behaves_like_a_null_handle() {
    let board = TestBoard::new();
    let mut metal = system::init_system(board.devices().unwrap());
    let mut rproc = Remoteproc::<R5Proc>::new();
    rproc.init(&mut metal, Some(KickConfig::default())).unwrap();
    rproc.remove(&mut metal);

    assert_eq!(rproc.notify(0), Err(RprocError::InvalidArgument));
    assert_eq!(board.kick_word(), Some(PollFlag::Running.as_u32()));

    let request = MmapRequest {
        pa: Some(Paddr::new(0x1000)),
        da: None,
        size: 0x100,
        attr: IoAttr::NONE,
    };
    // SAFETY: rejected before anything is mapped.
    assert_eq!(unsafe { rproc.mmap(request) }, Err(RprocError::InvalidArgument));

    // Second remove is a no-op.
    rproc.remove(&mut metal);
    assert_eq!(metal.devices().open_count(KICK_BUS_NAME, KICK_DEV_NAME), 0);
}

#[test]
fn unsupported_operations_report_enosys() {
    let board = TestBoard::new();
    let mut metal = system::init_system(board.devices().unwrap());
    let mut rproc = Remoteproc::<R5Proc>::new();
    rproc.init(&mut metal, Some(KickConfig::default())).unwrap();

    for result in [rproc.start(), rproc.stop(), rproc.shutdown()] {
        assert_eq!(result, Err(RprocError::Unsupported));
        assert_eq!(result.unwrap_err().errno(), -38);
    }
    assert_eq!(board.kick_word(), Some(PollFlag::Running.as_u32()));
}
