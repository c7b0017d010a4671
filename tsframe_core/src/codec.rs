use crate::buffer::GrowableBuffer;

/// Compression primitive applied to every frame payload.
///
/// Each `Compressor` implementation:
/// - Compresses and decompresses one payload at a time. No state may carry
///   over between calls; every frame is decodable on its own.
/// - Writes into the caller's [`GrowableBuffer`], reusing its capacity, and
///   leaves the buffer's logical length equal to the number of bytes
///   produced.
///
/// The framing layer never records which compressor wrote a file, so the
/// reader must be given the same compressor the writer used.
pub trait Compressor: Send + Sync {
    /// Human-readable name for CLI selection and display.
    fn name(&self) -> &'static str;

    /// Compress `raw` into `dst`.
    fn encode(&self, raw: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()>;

    /// Decompress `compressed` into `dst`.
    ///
    /// Corrupt or truncated input must surface as an error, never as a
    /// silently shortened result.
    fn decode(&self, compressed: &[u8], dst: &mut GrowableBuffer) -> anyhow::Result<()>;
}
