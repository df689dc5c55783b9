//! Test support utilities - only compiled in test builds.

use core::cell::RefCell;

use heapless::Vec;

use crate::device::{
    config::{DeviceBuilder, DeviceConfig, DeviceIdentity},
    error::MapError,
    window::{MmioResource, RegisterMapper, RegisterWindow},
};

/// Everything a device pushed through its register window, in order.
#[derive(Debug, Default)]
pub struct WindowLog {
    pub writes: Vec<u8, 16>,
    pub released: bool,
}

impl WindowLog {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Window stub that records writes and release instead of touching hardware.
pub struct RecordingWindow<'a> {
    log: &'a RefCell<WindowLog>,
}

impl RegisterWindow for RecordingWindow<'_> {
    fn write_byte(&mut self, value: u8) {
        self.log.borrow_mut().writes.push(value).unwrap();
    }

    fn release(self) {
        self.log.borrow_mut().released = true;
    }
}

/// Mapper handing out recording windows, optionally failing every map call.
pub struct RecordingMapper<'a> {
    log: &'a RefCell<WindowLog>,
    fail_with: Option<MapError>,
}

impl<'a> RecordingMapper<'a> {
    pub fn new(log: &'a RefCell<WindowLog>) -> Self {
        Self {
            log,
            fail_with: None,
        }
    }

    pub fn failing(log: &'a RefCell<WindowLog>, err: MapError) -> Self {
        Self {
            log,
            fail_with: Some(err),
        }
    }
}

impl<'a> RegisterMapper for RecordingMapper<'a> {
    type Window = RecordingWindow<'a>;

    fn map(&mut self, _resource: MmioResource) -> Result<RecordingWindow<'a>, MapError> {
        match self.fail_with {
            Some(err) => Err(err),
            None => Ok(RecordingWindow { log: self.log }),
        }
    }
}

/// Config matching the observed one-byte mux instance.
pub fn channel_mux_config() -> DeviceConfig<1> {
    DeviceBuilder::new()
        .buffer_len::<1>()
        .identity(DeviceIdentity::new("channelmux", "asps,de1soc-channelmux").unwrap())
        .resource(MmioResource::new(0xFF20_0000, 1))
        .build()
}

/// One-byte config with a non-default reset value.
pub fn reset_override_config(reset: u8) -> DeviceConfig<1> {
    DeviceBuilder::new()
        .buffer_len::<1>()
        .identity(DeviceIdentity::new("channelmux", "asps,de1soc-channelmux").unwrap())
        .resource(MmioResource::new(0xFF20_0000, 1))
        .reset_value(reset)
        .build()
}

/// Wider buffer for exercising offset clamping and the leading-byte push.
pub fn wide_config() -> DeviceConfig<4> {
    DeviceBuilder::new()
        .buffer_len::<4>()
        .identity(DeviceIdentity::new("widemux", "asps,de1soc-widemux").unwrap())
        .resource(MmioResource::new(0xFF20_0010, 4))
        .build()
}
