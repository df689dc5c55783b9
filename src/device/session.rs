use crate::device::error::DeviceError;

/// Offset-addressed transfer capability exposed by a published endpoint.
///
/// One implementation exists per device instance; sessions hold an explicit
/// back-reference to theirs instead of recovering it structurally.
pub trait SessionOps {
    /// Reads at `offset` into `out`, returning the bytes delivered.
    ///
    /// Delivers fewer bytes than requested at end-of-range and 0 bytes at or
    /// past it - an empty read is the end-of-stream signal, not an error.
    fn read_at(&self, offset: usize, out: &mut [u8]) -> usize;

    /// Writes `data` at `offset`, returning the bytes written.
    ///
    /// # Errors
    /// * [`DeviceError::InvalidArgument`] - no bytes were transferable
    fn write_at(&self, offset: usize, data: &[u8]) -> Result<usize, DeviceError>;
}

/// An open handle onto a published endpoint.
///
/// Each handle owns an independent cursor; handles are not persisted across
/// opens. The cursor has no upper bound of its own - transfers clamp per
/// call, so a cursor past the end simply reads empty and fails writes.
pub struct FileSession<'a, E: SessionOps + ?Sized> {
    endpoint: &'a E,
    offset: usize,
}

impl<'a, E: SessionOps + ?Sized> FileSession<'a, E> {
    pub(crate) fn new(endpoint: &'a E) -> Self {
        Self {
            endpoint,
            offset: 0,
        }
    }

    /// Reads from the cursor, advancing it by the bytes actually delivered.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let delivered = self.endpoint.read_at(self.offset, out);
        self.offset += delivered;
        delivered
    }

    /// Writes at the cursor, advancing it by the bytes actually written.
    ///
    /// # Errors
    /// * [`DeviceError::InvalidArgument`] - no bytes were transferable
    pub fn write(&mut self, data: &[u8]) -> Result<usize, DeviceError> {
        let written = self.endpoint.write_at(self.offset, data)?;
        self.offset += written;
        Ok(written)
    }

    /// Current cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the cursor. No bound is enforced here; clamping is per call.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }
}
