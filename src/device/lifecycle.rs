#![allow(unsafe_code)]

//! Attach/detach orchestration and the published session endpoint.

use core::cell::UnsafeCell;

use log::{debug, info};

use crate::device::{
    buffer::DeviceBuffer,
    config::DeviceConfig,
    error::{DeviceError, MapError},
    session::{FileSession, SessionOps},
    transfer,
    window::{RegisterMapper, RegisterWindow},
};

struct Shared<const N: usize, W: RegisterWindow> {
    buffer: DeviceBuffer<N>,
    window: W,
}

/// An attached device instance: the published session endpoint.
///
/// Holds the shadow buffer and the mapped register window for one bound
/// register. Attaching maps the window and resets the register; detaching
/// resets it again and releases the window. Detach consumes the device, so
/// a second detach - or a detach while sessions are still open - does not
/// compile.
///
/// Sessions share the buffer and window through this endpoint; every
/// transfer runs inside a critical section, so concurrent sessions
/// serialize rather than race.
pub struct Device<const N: usize, W: RegisterWindow> {
    config: DeviceConfig<N>,
    shared: UnsafeCell<Shared<N, W>>,
}

impl<const N: usize, W: RegisterWindow> Device<N, W> {
    /// Binds the configured device to its hardware resource.
    ///
    /// Allocates the zeroed shadow buffer, maps the register window, and
    /// forces the register to the configured reset value.
    ///
    /// # Errors
    /// * [`MapError`] - the address range could not be mapped; nothing is
    ///   retained
    pub fn attach<M>(config: DeviceConfig<N>, mapper: &mut M) -> Result<Self, MapError>
    where
        M: RegisterMapper<Window = W>,
    {
        let buffer = DeviceBuffer::zeroed();
        let mut window = mapper.map(config.resource())?;
        debug!(
            "{}: mapped {} byte register window",
            config.identity().name(),
            N,
        );

        window.write_byte(config.reset_value());
        info!("{}: attached", config.identity().name());

        Ok(Self {
            config,
            shared: UnsafeCell::new(Shared { buffer, window }),
        })
    }

    /// Opens a session handle with its own cursor.
    pub fn open(&self) -> FileSession<'_, Self> {
        FileSession::new(self)
    }

    pub fn config(&self) -> &DeviceConfig<N> {
        &self.config
    }

    /// Resets the register and releases the window.
    pub fn detach(self) {
        let Shared { mut window, .. } = self.shared.into_inner();

        window.write_byte(self.config.reset_value());
        info!("{}: detached", self.config.identity().name());

        window.release();
    }
}

impl<const N: usize, W: RegisterWindow> SessionOps for Device<N, W> {
    fn read_at(&self, offset: usize, out: &mut [u8]) -> usize {
        critical_section::with(|_| {
            let shared = unsafe { &*self.shared.get() };
            transfer::read_at(&shared.buffer, offset, out)
        })
    }

    fn write_at(&self, offset: usize, data: &[u8]) -> Result<usize, DeviceError> {
        critical_section::with(|_| {
            let shared = unsafe { &mut *self.shared.get() };
            let written = transfer::write_at(&mut shared.buffer, offset, data)?;

            // Every successful write re-broadcasts the shadow's leading byte,
            // even when the bytes landed elsewhere in the buffer.
            let lead = shared.buffer.leading_byte();
            shared.window.write_byte(lead);

            Ok(written)
        })
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use super::*;
    use crate::device::test_support::{
        RecordingMapper, WindowLog, channel_mux_config, wide_config,
    };

    #[test]
    fn attach_then_detach_issues_exactly_two_resets() {
        let log = RefCell::new(WindowLog::new());
        let mut mapper = RecordingMapper::new(&log);

        let device = Device::attach(channel_mux_config(), &mut mapper).unwrap();
        device.detach();

        let log = log.borrow();
        assert_eq!(log.writes.as_slice(), &[0x00, 0x00]);
        assert!(log.released);
    }

    #[test]
    fn attach_honors_reset_override() {
        let log = RefCell::new(WindowLog::new());
        let mut mapper = RecordingMapper::new(&log);

        let device = Device::attach(
            crate::device::test_support::reset_override_config(0x7F),
            &mut mapper,
        )
        .unwrap();
        device.detach();

        assert_eq!(log.borrow().writes.as_slice(), &[0x7F, 0x7F]);
    }

    #[test]
    fn failed_map_aborts_attach_without_register_writes() {
        let log = RefCell::new(WindowLog::new());
        let mut mapper = RecordingMapper::failing(&log, MapError::EmptyRange);

        let result = Device::attach(channel_mux_config(), &mut mapper);
        assert_eq!(result.err(), Some(MapError::EmptyRange));

        let log = log.borrow();
        assert!(log.writes.is_empty());
        assert!(!log.released);
    }

    #[test]
    fn every_write_pushes_the_leading_byte() {
        let log = RefCell::new(WindowLog::new());
        let mut mapper = RecordingMapper::new(&log);
        let device = Device::attach(wide_config(), &mut mapper).unwrap();

        assert_eq!(device.write_at(0, &[0x11, 0x22]), Ok(2));
        assert_eq!(log.borrow().writes.last(), Some(&0x11));

        // A write landing past the leading byte still re-broadcasts it
        assert_eq!(device.write_at(2, &[0x33, 0x44]), Ok(2));
        assert_eq!(log.borrow().writes.last(), Some(&0x11));

        assert_eq!(device.write_at(0, &[0x55]), Ok(1));
        assert_eq!(log.borrow().writes.last(), Some(&0x55));

        // Reset, three data writes so far
        assert_eq!(log.borrow().writes.len(), 4);

        device.detach();
    }

    #[test]
    fn failed_write_leaves_register_untouched() {
        let log = RefCell::new(WindowLog::new());
        let mut mapper = RecordingMapper::new(&log);
        let device = Device::attach(channel_mux_config(), &mut mapper).unwrap();

        assert_eq!(
            device.write_at(1, &[0x09]),
            Err(DeviceError::InvalidArgument)
        );

        // Only the attach reset reached hardware
        assert_eq!(log.borrow().writes.as_slice(), &[0x00]);

        device.detach();
    }

    #[test]
    fn reads_reflect_the_shadow_not_hardware() {
        let log = RefCell::new(WindowLog::new());
        let mut mapper = RecordingMapper::new(&log);
        let device = Device::attach(wide_config(), &mut mapper).unwrap();

        assert_eq!(device.write_at(1, &[0xBE, 0xEF]), Ok(2));

        let mut out = [0u8; 4];
        assert_eq!(device.read_at(0, &mut out), 4);
        assert_eq!(out, [0x00, 0xBE, 0xEF, 0x00]);

        device.detach();
    }

    #[test]
    fn session_scenario_single_byte_register() {
        let log = RefCell::new(WindowLog::new());
        let mut mapper = RecordingMapper::new(&log);
        let device = Device::attach(channel_mux_config(), &mut mapper).unwrap();

        {
            let mut session = device.open();
            assert_eq!(session.write(&[0x05]), Ok(1));
            assert_eq!(log.borrow().writes.last(), Some(&0x05));

            session.seek(0);
            let mut out = [0u8; 1];
            assert_eq!(session.read(&mut out), 1);
            assert_eq!(out, [0x05]);

            // Cursor now at the end: empty read, invalid write
            assert_eq!(session.read(&mut out), 0);
            assert_eq!(session.write(&[0x09]), Err(DeviceError::InvalidArgument));
        }

        device.detach();
        let log = log.borrow();
        assert_eq!(log.writes.as_slice(), &[0x00, 0x05, 0x00]);
        assert!(log.released);
    }
}
