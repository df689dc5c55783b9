//! A `no_std`, no-alloc session layer over memory-mapped mux control registers.
//!
//! This crate exposes a single hardware control register as a byte-addressable
//! session: callers open a handle onto an attached device, read back the
//! register's last-written value from an in-memory shadow, and write new
//! values that are pushed to hardware immediately.
//!
//! # Features
//!
//! - **Zero heap allocation** - Shadow buffer and identity strings are fixed-capacity
//! - **Offset-clamped transfers** - Partial reads and writes with stream-style short counts
//! - **Deterministic resets** - The register is forced to a known value on attach and detach
//! - **Instrumentable hardware seam** - `RegisterWindow`/`RegisterMapper` traits with a
//!   volatile MMIO implementation
//! - **One parameterized device** - Near-identical register instances differ only by
//!   configuration
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐ read/write ┌───────────────────────────────┐
//! │  FileSession  │───────────▶│  Device                       │
//! │  (cursor)     │            │  ┌──────────────┐ write_byte  │
//! └───────────────┘            │  │ DeviceBuffer │────────────▶│──▶ RegisterWindow
//!          ...                 │  │ (shadow)     │             │    (mapped MMIO range)
//! ┌───────────────┐            │  └──────────────┘             │
//! │  FileSession  │───────────▶│  attach: map + reset          │
//! └───────────────┘            │  detach: reset + release      │
//!                              └───────────────────────────────┘
//! ```
//!
//! - **Reads** copy out of the shadow buffer, clamped to the register size;
//!   reading at or past the end returns zero bytes, not an error.
//! - **Writes** copy into the shadow buffer and then push its leading byte to
//!   the physical register. A write that cannot move any bytes fails with
//!   [`DeviceError::InvalidArgument`](device::DeviceError).
//! - **Attach/detach** bracket the device lifetime with register resets, so
//!   hardware is in a known state whenever no driver owns it.
//!
//! # Example
//!
//! ```rust,no_run
//! use regmux::prelude::*;
//!
//! // Configuration for one mux instance, as published by the platform layer.
//! let config = DeviceBuilder::new()
//!     .buffer_len::<1>()
//!     .identity(DeviceIdentity::new("channelmux", "asps,de1soc-channelmux").unwrap())
//!     .resource(MmioResource::new(0xFF20_0000, 1))
//!     .build();
//!
//! // The platform layer vouches that mapped resources are device memory.
//! let mut mapper = unsafe { MmioMapper::new() };
//! let device = Device::attach(config, &mut mapper).unwrap();
//!
//! let mut session = device.open();
//! session.write(&[0x05]).unwrap(); // select channel 5, pushed to hardware
//!
//! let mut selected = [0u8; 1];
//! session.seek(0);
//! session.read(&mut selected); // read back the shadow copy
//! assert_eq!(selected, [0x05]);
//!
//! device.detach(); // reset the register and release the window
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod device;

pub mod prelude {
    pub use crate::device::prelude::*;
}
