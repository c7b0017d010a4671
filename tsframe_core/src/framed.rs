use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::buffer::GrowableBuffer;
use crate::codec::Compressor;
use crate::format::{DEFAULT_BUFFER_CAPACITY, DEFAULT_PROGRESS_INTERVAL};
use crate::progress::ProgressReporter;
use crate::stream::Stream;

/// Tuning knobs for a [`FramedCodec`].
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Starting capacity of each of the four reusable buffers.
    pub initial_capacity: usize,
    /// Minimum time between two progress lines while reading.
    pub progress_interval: Duration,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Capacities of the codec's reusable buffers at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacities {
    pub raw: usize,
    pub decoded: usize,
    pub marshaled: usize,
    pub encoded: usize,
}

/// Length-prefixed, compressed record codec over one stream.
///
/// # Frame layout
/// ```text
/// [len: u32 BE][compressed payload: len bytes]
/// ```
///
/// # Buffer reuse
/// Four buffers live as long as the codec: raw bytes read from the stream,
/// their decompressed form, a record's marshaled form, and its compressed
/// form. Each call resizes the buffer it needs to the exact length required
/// and only reallocates when that length exceeds the current capacity.
///
/// # Concurrency
/// Reads and writes take `&mut self`; one codec serves one caller at a
/// time. Use one codec per stream.
///
/// Reading is implemented in `reader.rs`, writing in `writer.rs`.
pub struct FramedCodec<S: Stream> {
    pub(crate) stream: S,
    pub(crate) compressor: Box<dyn Compressor>,
    pub(crate) progress: ProgressReporter,
    pub(crate) raw: GrowableBuffer,
    pub(crate) decoded: GrowableBuffer,
    pub(crate) marshaled: GrowableBuffer,
    pub(crate) encoded: GrowableBuffer,
}

impl<S: Stream> FramedCodec<S> {
    pub fn new(stream: S, compressor: Box<dyn Compressor>) -> Self {
        Self::with_options(stream, compressor, CodecOptions::default())
    }

    /// Build a codec, querying the stream's total size once.
    ///
    /// A size query that fails is treated as "unknown" and only disables
    /// percentage progress reporting.
    pub fn with_options(mut stream: S, compressor: Box<dyn Compressor>, opts: CodecOptions) -> Self {
        let total_size = stream.total_size().unwrap_or_else(|e| {
            log::debug!("stream size unavailable, progress disabled: {}", e);
            0
        });
        let cap = opts.initial_capacity;
        Self {
            stream,
            compressor,
            progress: ProgressReporter::new("stream", total_size, opts.progress_interval),
            raw: GrowableBuffer::with_capacity(cap),
            decoded: GrowableBuffer::with_capacity(cap),
            marshaled: GrowableBuffer::with_capacity(cap),
            encoded: GrowableBuffer::with_capacity(cap),
        }
    }

    /// Replace the context label that prefixes progress log lines.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.progress = ProgressReporter::new(
            label,
            self.progress.total_size(),
            self.progress.interval(),
        );
        self
    }

    /// Name of the compressor applied to every payload.
    pub fn compressor_name(&self) -> &'static str {
        self.compressor.name()
    }

    /// Total stream size cached at construction; 0 when unknown.
    pub fn total_size(&self) -> u64 {
        self.progress.total_size()
    }

    /// Progress lines emitted so far.
    pub fn progress_reports(&self) -> u64 {
        self.progress.reports()
    }

    pub fn buffer_capacities(&self) -> BufferCapacities {
        BufferCapacities {
            raw: self.raw.capacity(),
            decoded: self.decoded.capacity(),
            marshaled: self.marshaled.capacity(),
            encoded: self.encoded.capacity(),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl FramedCodec<File> {
    /// Open an existing file for reading frames from the start.
    pub fn open(path: impl AsRef<Path>, compressor: Box<dyn Compressor>) -> io::Result<Self> {
        Self::open_with_options(path, compressor, CodecOptions::default())
    }

    pub fn open_with_options(
        path: impl AsRef<Path>,
        compressor: Box<dyn Compressor>,
        opts: CodecOptions,
    ) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::with_options(file, compressor, opts).with_label(file_label(path)))
    }

    /// Create (or truncate) a file for writing frames.
    pub fn create(path: impl AsRef<Path>, compressor: Box<dyn Compressor>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(Self::new(file, compressor).with_label(file_label(path)))
    }
}

fn file_label(path: &Path) -> String {
    format!("file {}", path.display())
}
