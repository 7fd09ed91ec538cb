//! Frame window bounds for aligned byte regions

use crate::error::{ItfError, Result};
use crate::format::constants::FRAME_SIZE;

/// View a frame-aligned byte region as fixed-size frame windows
///
/// The region length must be a non-zero multiple of [`FRAME_SIZE`].
pub fn frame_windows(bytes: &[u8]) -> Result<&[[u8; FRAME_SIZE]]> {
    if bytes.is_empty() {
        return Err(ItfError::TruncatedFile);
    }
    bytemuck::try_cast_slice(bytes).map_err(|_| ItfError::InsufficientBuffer)
}

/// Byte range covered by `count` frames starting at `offset`
///
/// Overflow is reported as a truncated file since no real file can hold it.
pub const fn frame_region(offset: usize, count: usize) -> Result<(usize, usize)> {
    let len = match count.checked_mul(FRAME_SIZE) {
        Some(len) => len,
        None => return Err(ItfError::TruncatedFile),
    };
    match offset.checked_add(len) {
        Some(end) => Ok((offset, end)),
        None => Err(ItfError::TruncatedFile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_windows() {
        let bytes = [7u8; FRAME_SIZE * 3];
        let windows = frame_windows(&bytes).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2][FRAME_SIZE - 1], 7);

        assert_eq!(frame_windows(&bytes[..FRAME_SIZE + 1]), Err(ItfError::InsufficientBuffer));
        assert_eq!(frame_windows(&[]), Err(ItfError::TruncatedFile));
    }

    #[test]
    fn test_frame_region() {
        assert_eq!(frame_region(10, 2), Ok((10, 810)));
        assert_eq!(frame_region(0, usize::MAX), Err(ItfError::TruncatedFile));
    }
}
