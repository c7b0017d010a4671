mod gzip_codec;
mod lz4_codec;
mod passthrough;
mod snappy_codec;
mod zstd_codec;

pub use gzip_codec::GzipCodec;
pub use lz4_codec::Lz4Codec;
pub use passthrough::PassThroughCodec;
pub use snappy_codec::SnappyCodec;
pub use zstd_codec::ZstdCodec;

use tsframe_core::Compressor;

/// Names accepted by [`codec_by_name`], in display order.
pub const CODEC_NAMES: &[&str] = &["snappy", "zstd", "lz4", "gzip", "passthrough"];

/// Resolve a compressor from its CLI name.
///
/// Files carry no header, so the reader has to be told which compressor
/// the writer used; `snappy` is what the load tool writes by default.
pub fn codec_by_name(name: &str, zstd_level: i32) -> anyhow::Result<Box<dyn Compressor>> {
    match name {
        "snappy" | "s" => Ok(Box::new(SnappyCodec)),
        "zstd" | "z" => Ok(Box::new(ZstdCodec::new(zstd_level))),
        "lz4" | "l" => Ok(Box::new(Lz4Codec)),
        "gzip" | "gz" => Ok(Box::new(GzipCodec::default())),
        "passthrough" | "pass" | "none" => Ok(Box::new(PassThroughCodec)),
        other => anyhow::bail!(
            "unknown codec '{}'. Valid options: {}",
            other,
            CODEC_NAMES.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsframe_core::GrowableBuffer;

    fn text(len: usize) -> Vec<u8> {
        let pattern = b"cpu_usage{host=\"a\",core=\"0\"} 0.75 1500000000000\n";
        (0..len).map(|i| pattern[i % pattern.len()]).collect()
    }

    #[test]
    fn every_named_codec_round_trips_into_reused_buffers() {
        for name in CODEC_NAMES {
            let codec = codec_by_name(name, 3).unwrap();
            assert_eq!(codec.name(), *name);

            let mut encoded = GrowableBuffer::with_capacity(16);
            let mut decoded = GrowableBuffer::with_capacity(16);
            for len in [5000usize, 100, 0, 3000] {
                let raw = text(len);
                codec.encode(&raw, &mut encoded).unwrap();
                codec.decode(encoded.as_slice(), &mut decoded).unwrap();
                assert_eq!(decoded.as_slice(), raw.as_slice(), "{} at {} bytes", name, len);
            }
        }
    }

    #[test]
    fn compressing_codecs_shrink_repetitive_input() {
        let raw = text(64 * 1024);
        for name in ["snappy", "zstd", "lz4", "gzip"] {
            let codec = codec_by_name(name, 3).unwrap();
            let mut encoded = GrowableBuffer::new();
            codec.encode(&raw, &mut encoded).unwrap();
            assert!(encoded.len() < raw.len() / 4, "{} did not compress", name);
        }
    }

    #[test]
    fn corrupt_input_is_an_error() {
        let garbage = [0xFFu8; 32];
        for name in ["snappy", "zstd", "lz4", "gzip"] {
            let codec = codec_by_name(name, 3).unwrap();
            let mut out = GrowableBuffer::new();
            assert!(codec.decode(&garbage, &mut out).is_err(), "{} accepted garbage", name);
        }
    }

    #[test]
    fn unknown_name_lists_valid_options() {
        let err = codec_by_name("brotli", 3).err().unwrap().to_string();
        assert!(err.contains("snappy"), "got: {err}");
    }
}
