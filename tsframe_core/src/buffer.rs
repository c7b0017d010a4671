use std::collections::TryReserveError;

/// Reusable byte buffer owned by a single codec instance.
///
/// The logical length is whatever the last operation asked for; the backing
/// allocation only ever grows. Shrinking the logical length keeps the
/// capacity, so a stream of similarly sized frames settles into zero
/// allocations per call after the first few.
///
/// Bytes beyond the logical length are never observable through
/// [`as_slice`](Self::as_slice): a shorter frame following a longer one
/// cannot leak the previous frame's tail.
#[derive(Debug, Default)]
pub struct GrowableBuffer {
    buf: Vec<u8>,
}

impl GrowableBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate `capacity` bytes with a logical length of zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Make sure at least `n` bytes fit without reallocating.
    ///
    /// Returns `true` when the backing allocation had to grow.
    pub fn ensure_capacity(&mut self, n: usize) -> bool {
        let cap = self.buf.capacity();
        if cap >= n {
            return false;
        }
        log::debug!("growing reusable buffer from {} to {} bytes", cap, n);
        self.buf.reserve_exact(n - self.buf.len());
        true
    }

    /// Set the logical length to exactly `n` and hand out the writable slice.
    ///
    /// Bytes retained from an earlier, longer use are left in place; bytes
    /// newly exposed by growing the length are zeroed. Callers that write
    /// only part of the slice must [`truncate`](Self::truncate) afterwards.
    pub fn as_mut_slice(&mut self, n: usize) -> &mut [u8] {
        self.ensure_capacity(n);
        self.buf.resize(n, 0);
        &mut self.buf[..]
    }

    /// Shorten the logical length, keeping the capacity.
    pub fn truncate(&mut self, n: usize) {
        self.buf.truncate(n);
    }

    /// Empty the buffer and expose the backing `Vec` for append-style
    /// writers (`io::Write`, `read_to_end`). Capacity is retained.
    pub fn recycle(&mut self) -> &mut Vec<u8> {
        self.buf.clear();
        &mut self.buf
    }

    /// Like [`recycle`](Self::recycle), but first makes room for `n` bytes
    /// without aborting when the allocation cannot be satisfied.
    ///
    /// Nothing is initialized: the caller appends exactly what it has.
    pub fn try_recycle(&mut self, n: usize) -> Result<&mut Vec<u8>, TryReserveError> {
        self.buf.clear();
        if self.buf.capacity() < n {
            log::debug!("growing reusable buffer from {} to {} bytes", self.buf.capacity(), n);
            self.buf.try_reserve_exact(n)?;
        }
        Ok(&mut self.buf)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}
