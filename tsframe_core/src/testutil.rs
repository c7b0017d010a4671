//! Fixtures shared by the unit tests.

use std::io::{self, Read, Write};

use crate::buffer::GrowableBuffer;
use crate::codec::Compressor;
use crate::record::Record;
use crate::stream::Stream;

/// Copies payloads verbatim.
pub struct Identity;

impl Compressor for Identity {
    fn name(&self) -> &'static str {
        "identity"
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

/// Opaque byte record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Record for Bytes {
    fn size(&self) -> usize {
        self.0.len()
    }

    fn marshal_to(&self, buf: &mut [u8]) -> anyhow::Result<usize> {
        buf[..self.0.len()].copy_from_slice(&self.0);
        Ok(self.0.len())
    }

    fn unmarshal(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(Bytes(bytes.to_vec()))
    }
}

/// Record whose `marshal_to` reports a different length than `size()`.
pub struct Lying {
    pub declared: usize,
    pub written: usize,
}

impl Record for Lying {
    fn size(&self) -> usize {
        self.declared
    }

    fn marshal_to(&self, buf: &mut [u8]) -> anyhow::Result<usize> {
        let n = self.written.min(buf.len());
        buf[..n].fill(0xEE);
        Ok(self.written)
    }

    fn unmarshal(_bytes: &[u8]) -> anyhow::Result<Self> {
        anyhow::bail!("never read back")
    }
}

/// In-memory stream whose offset query always fails and whose writes can
/// be made to fail after a number of calls.
#[derive(Default)]
pub struct Flaky {
    pub data: io::Cursor<Vec<u8>>,
    pub total: u64,
    pub fail_write_after: Option<usize>,
    pub writes: usize,
    pub offset_queries: usize,
}

impl Read for Flaky {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Write for Flaky {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(limit) = self.fail_write_after {
            if self.writes >= limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "disk gone"));
            }
        }
        self.writes += 1;
        self.data.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for Flaky {
    fn offset(&mut self) -> io::Result<u64> {
        self.offset_queries += 1;
        Err(io::Error::new(io::ErrorKind::Unsupported, "offset unavailable"))
    }

    fn total_size(&mut self) -> io::Result<u64> {
        Ok(self.total)
    }
}
