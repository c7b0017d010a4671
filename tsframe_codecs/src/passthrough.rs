use tsframe_core::{Compressor, GrowableBuffer};

/// No-op compressor: payloads are stored verbatim.
///
/// Useful for inspecting the marshaled bytes of a file directly, and for
/// checking the framing independently of any compression.
pub struct PassThroughCodec;

impl Compressor for PassThroughCodec {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn encode(&self, raw: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        dst.as_mut_slice(raw.len()).copy_from_slice(raw);
        Ok(())
    }

    fn decode(&self, compressed: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()> {
        dst.as_mut_slice(compressed.len()).copy_from_slice(compressed);
        Ok(())
    }
}
