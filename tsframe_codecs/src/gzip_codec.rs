use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tsframe_core::{Compressor, GrowableBuffer};

/// Gzip (DEFLATE) compressor.
///
/// Slowest of the bundled options; mostly useful when frames need to be
/// inspected with standard tooling after stripping the length prefixes.
pub struct GzipCodec {
    pub level: Compression,
}

impl Default for GzipCodec {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

impl Compressor for GzipCodec {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn encode(&self, raw: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        let mut enc = GzEncoder::new(dst.recycle(), self.level);
        enc.write_all(raw)?;
        enc.finish()?;
        Ok(())
    }

    fn decode(&self, compressed: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        let mut dec = GzDecoder::new(compressed);
        dec.read_to_end(dst.recycle())?;
        Ok(())
    }
}
