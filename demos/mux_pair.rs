//! Demo: the two mux devices instantiated from one parameterized type
//!
//! This demo demonstrates:
//! - Building the two observed device configs, which differ only in identity
//! - Attaching through a `RegisterMapper` implementation
//! - Session reads/writes with offset clamping
//! - The reset-on-attach / reset-on-detach bracket
//!
//! It runs on a host machine, so a loopback window stands in for hardware:
//! it stores the last byte "hardware" saw instead of touching device memory.

use core::cell::RefCell;

use regmux::prelude::*;

/// Loopback stand-in for a mapped register.
struct LoopbackWindow<'a> {
    register: &'a RefCell<u8>,
}

impl RegisterWindow for LoopbackWindow<'_> {
    fn write_byte(&mut self, value: u8) {
        *self.register.borrow_mut() = value;
    }

    fn release(self) {}
}

struct LoopbackMapper<'a> {
    register: &'a RefCell<u8>,
}

impl<'a> RegisterMapper for LoopbackMapper<'a> {
    type Window = LoopbackWindow<'a>;

    fn map(&mut self, _resource: MmioResource) -> Result<LoopbackWindow<'a>, MapError> {
        Ok(LoopbackWindow {
            register: self.register,
        })
    }
}

fn main() {
    // The two instances share every behavior; only identity and the bound
    // range differ.
    let channel_config = DeviceBuilder::new()
        .buffer_len::<1>()
        .identity(DeviceIdentity::new("channelmux", "asps,de1soc-channelmux").unwrap())
        .resource(MmioResource::new(0xFF20_0000, 1))
        .build();

    let source_config = DeviceBuilder::new()
        .buffer_len::<1>()
        .identity(DeviceIdentity::new("datasourcemux", "asps,de1soc-datasourcemux").unwrap())
        .resource(MmioResource::new(0xFF20_0010, 1))
        .build();

    let channel_reg = RefCell::new(0xFFu8);
    let source_reg = RefCell::new(0xFFu8);

    // Attach resets both registers to 0x00.
    let channel = Device::attach(
        channel_config,
        &mut LoopbackMapper {
            register: &channel_reg,
        },
    )
    .unwrap();
    let source = Device::attach(
        source_config,
        &mut LoopbackMapper {
            register: &source_reg,
        },
    )
    .unwrap();
    println!(
        "after attach: channel reg = {:#04x}, source reg = {:#04x}",
        *channel_reg.borrow(),
        *source_reg.borrow(),
    );

    // Select channel 5 and data source 2; each write lands in the shadow
    // buffer and is pushed to the register immediately.
    let mut channel_session = channel.open();
    channel_session.write(&[0x05]).unwrap();

    let mut source_session = source.open();
    source_session.write(&[0x02]).unwrap();

    println!(
        "after select: channel reg = {:#04x}, source reg = {:#04x}",
        *channel_reg.borrow(),
        *source_reg.borrow(),
    );

    // Read back the shadow copies.
    let mut selected = [0u8; 1];
    channel_session.seek(0);
    channel_session.read(&mut selected);
    println!(
        "{} selects {:#04x}",
        channel.config().identity().name(),
        selected[0],
    );

    // Reading past the one-byte register is an empty read, and a write
    // there is rejected.
    assert_eq!(channel_session.read(&mut selected), 0);
    assert!(channel_session.write(&[0x09]).is_err());

    drop(channel_session);
    drop(source_session);

    // Detach resets both registers again.
    channel.detach();
    source.detach();
    println!(
        "after detach: channel reg = {:#04x}, source reg = {:#04x}",
        *channel_reg.borrow(),
        *source_reg.borrow(),
    );
}
