use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};
use tsframe_core::{Compressor, GrowableBuffer};

const SIZE_PREFIX: usize = 4;

/// LZ4 cannot expand a block by more than this factor; anything claiming
/// more is corrupt and must not drive an allocation.
const MAX_EXPANSION: usize = 255;

/// LZ4 block compressor.
///
/// Payloads carry the uncompressed length as a little-endian u32 ahead of
/// the LZ4 block (the `lz4_flex` "size prepended" layout), so decoding can
/// size the destination buffer up front.
///
/// Best for: replaying large files where decode speed matters most.
pub struct Lz4Codec;

impl Compressor for Lz4Codec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn encode(&self, raw: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        let raw_len = u32::try_from(raw.len())
            .map_err(|_| anyhow::anyhow!("lz4 input of {} bytes is too large", raw.len()))?;
        let out = dst.as_mut_slice(SIZE_PREFIX + get_maximum_output_size(raw.len()));
        out[..SIZE_PREFIX].copy_from_slice(&raw_len.to_le_bytes());
        let n = compress_into(raw, &mut out[SIZE_PREFIX..])
            .map_err(|e| anyhow::anyhow!("lz4 compress error: {}", e))?;
        dst.truncate(SIZE_PREFIX + n);
        Ok(())
    }

    fn decode(&self, compressed: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        if compressed.len() < SIZE_PREFIX {
            anyhow::bail!("lz4 payload of {} bytes has no size prefix", compressed.len());
        }
        let (prefix, block) = compressed.split_at(SIZE_PREFIX);
        let mut len_bytes = [0u8; SIZE_PREFIX];
        len_bytes.copy_from_slice(prefix);
        let raw_len = u32::from_le_bytes(len_bytes) as usize;
        if raw_len > block.len().saturating_mul(MAX_EXPANSION) {
            anyhow::bail!(
                "lz4 size prefix {} is implausible for a {} byte block",
                raw_len,
                block.len()
            );
        }

        let n = decompress_into(block, dst.as_mut_slice(raw_len))
            .map_err(|e| anyhow::anyhow!("lz4 decompress error: {}", e))?;
        if n != raw_len {
            anyhow::bail!("lz4 block decoded to {} bytes but prefix says {}", n, raw_len);
        }
        Ok(())
    }
}
