//! On-stream layout.
//!
//! ```text
//! [len: u32 BE][len bytes of compressed payload]
//! [len: u32 BE][len bytes of compressed payload]
//! ...
//! ```
//!
//! No file header, no footer, no padding, no checksum. End of data is only
//! valid exactly on a frame boundary.

use std::time::Duration;

/// Size of the big-endian length prefix in front of every frame.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Starting capacity of each reusable buffer: 1 MiB.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 20;

/// Minimum time between two progress reports on the read path.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Largest payload a length prefix can describe.
pub const MAX_FRAME_LEN: usize = u32::MAX as usize;

#[inline]
pub fn encode_length(len: u32) -> [u8; LENGTH_PREFIX_SIZE] {
    len.to_be_bytes()
}

#[inline]
pub fn decode_length(prefix: [u8; LENGTH_PREFIX_SIZE]) -> u32 {
    u32::from_be_bytes(prefix)
}

/// Total on-stream size of a frame carrying `payload_len` compressed bytes.
#[inline]
pub fn frame_size(payload_len: usize) -> u64 {
    (LENGTH_PREFIX_SIZE + payload_len) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_big_endian() {
        assert_eq!(encode_length(5), [0, 0, 0, 5]);
        assert_eq!(encode_length(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(decode_length([0, 0, 1, 0]), 256);
    }

    #[test]
    fn largest_prefix_bounds_frame_length() {
        assert_eq!(decode_length([0xFF; LENGTH_PREFIX_SIZE]) as usize, MAX_FRAME_LEN);
        assert_eq!(frame_size(0), LENGTH_PREFIX_SIZE as u64);
        assert_eq!(frame_size(MAX_FRAME_LEN), u64::from(u32::MAX) + 4);
    }
}
