pub mod buffer;
pub mod codec;
pub mod error;
pub mod format;
pub mod framed;
pub mod progress;
pub mod prompb;
pub mod reader;
pub mod record;
pub mod stream;
pub mod writer;

#[cfg(test)]
mod testutil;

pub use buffer::GrowableBuffer;
pub use codec::Compressor;
pub use error::{FrameError, Result, WriteStep};
pub use framed::{BufferCapacities, CodecOptions, FramedCodec};
pub use prompb::{Label, Sample, TimeSeries};
pub use reader::Records;
pub use record::{Record, RecordReader, RecordWriter};
pub use stream::Stream;
