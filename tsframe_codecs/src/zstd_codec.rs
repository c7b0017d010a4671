use tsframe_core::{Compressor, GrowableBuffer};

/// Zstandard compressor.
///
/// Each payload is one complete zstd frame at the configured level
/// (default: 3). Streams straight into the reused destination `Vec`, so the
/// buffer keeps whatever capacity it reached on earlier frames.
///
/// Best for: archiving generated load files where size matters.
pub struct ZstdCodec {
    /// Compression level (1 = fast / larger, 22 = slow / smallest).
    pub level: i32,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self { level: 3 }
    }
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Compressor for ZstdCodec {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn encode(&self, raw: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        zstd::stream::copy_encode(raw, dst.recycle(), self.level)?;
        Ok(())
    }

    fn decode(&self, compressed: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        zstd::stream::copy_decode(compressed, dst.recycle())?;
        Ok(())
    }
}
