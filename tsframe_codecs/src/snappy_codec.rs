use snap::raw::{decompress_len, max_compress_len, Decoder, Encoder};
use tsframe_core::{Compressor, GrowableBuffer};

/// A Snappy copy element emits at most 64 bytes from 3 input bytes, so no
/// valid block expands anywhere near this factor.
const MAX_EXPANSION: usize = 64;

/// Raw (unframed) Snappy block compressor.
///
/// This is the format the load tool has always written: each frame payload
/// is one Snappy block with its uncompressed length varint up front, which
/// lets decoding size the destination exactly before touching the data.
///
/// Best for: the default, fast enough to never be the bottleneck.
pub struct SnappyCodec;

impl Compressor for SnappyCodec {
    fn name(&self) -> &'static str {
        "snappy"
    }

    fn encode(&self, raw: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        let bound = max_compress_len(raw.len());
        if bound == 0 {
            anyhow::bail!("snappy input of {} bytes is too large", raw.len());
        }
        let n = Encoder::new()
            .compress(raw, dst.as_mut_slice(bound))
            .map_err(|e| anyhow::anyhow!("snappy compress error: {}", e))?;
        dst.truncate(n);
        Ok(())
    }

    fn decode(&self, compressed: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        let len = decompress_len(compressed)
            .map_err(|e| anyhow::anyhow!("snappy header error: {}", e))?;
        if len > compressed.len().saturating_mul(MAX_EXPANSION) {
            anyhow::bail!(
                "snappy header claims {} bytes from a {} byte block",
                len,
                compressed.len()
            );
        }
        let n = Decoder::new()
            .decompress(compressed, dst.as_mut_slice(len))
            .map_err(|e| anyhow::anyhow!("snappy decompress error: {}", e))?;
        dst.truncate(n);
        Ok(())
    }
}
