//! The clamped transfer core.
//!
//! Stateless per-call logic translating an offset+length request into an
//! actual byte transfer against the device buffer. Cursor bookkeeping
//! belongs to the session layer; pushing to hardware belongs to the device.

use crate::device::{buffer::DeviceBuffer, error::DeviceError};

/// Number of bytes a transfer may move given the buffer size, the cursor
/// offset, and the requested count.
///
/// Zero when the offset is at or past the end of the buffer; clamped to the
/// remaining room otherwise. The offset itself has no upper bound - clamping
/// happens per call, not by capping the cursor.
pub(crate) fn transfer_len(size: usize, offset: usize, requested: usize) -> usize {
    if offset >= size {
        return 0;
    }
    core::cmp::min(requested, size - offset)
}

/// Copies up to `out.len()` bytes from `buffer` at `offset` into `out`.
///
/// Returns the number of bytes delivered. Zero is the end-of-stream signal,
/// not an error.
pub(crate) fn read_at<const N: usize>(
    buffer: &DeviceBuffer<N>,
    offset: usize,
    out: &mut [u8],
) -> usize {
    let len = transfer_len(N, offset, out.len());
    if len == 0 {
        return 0;
    }

    out[..len].copy_from_slice(&buffer.as_slice()[offset..offset + len]);
    len
}

/// Copies up to `data.len()` bytes from `data` into `buffer` at `offset`.
///
/// Returns the number of bytes written. A write that cannot move any bytes
/// (cursor at or past the buffer end, or empty input) fails with
/// [`DeviceError::InvalidArgument`] and leaves the buffer untouched.
pub(crate) fn write_at<const N: usize>(
    buffer: &mut DeviceBuffer<N>,
    offset: usize,
    data: &[u8],
) -> Result<usize, DeviceError> {
    let len = transfer_len(N, offset, data.len());
    if len == 0 {
        return Err(DeviceError::InvalidArgument);
    }

    buffer.as_mut_slice()[offset..offset + len].copy_from_slice(&data[..len]);
    Ok(len)
}
