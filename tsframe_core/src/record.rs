/// A self-contained payload stored in one frame.
///
/// The codec sizes its buffer from [`size`](Record::size), lets the record
/// write itself in place with [`marshal_to`](Record::marshal_to), and
/// rejects the frame if the two disagree.
pub trait Record: Sized {
    /// Exact number of bytes `marshal_to` will produce.
    fn size(&self) -> usize;

    /// Serialize into `buf`, which is exactly `size()` bytes long.
    ///
    /// Returns the number of bytes actually written.
    fn marshal_to(&self, buf: &mut [u8]) -> anyhow::Result<usize>;

    /// Parse a record from exactly the bytes of one decoded payload.
    fn unmarshal(bytes: &[u8]) -> anyhow::Result<Self>;
}

/// Sequential source of records, terminated by
/// [`FrameError::EndOfStream`](crate::FrameError::EndOfStream).
pub trait RecordReader<R: Record> {
    fn read_next(&mut self) -> crate::Result<R>;
}

/// Sequential sink of records.
pub trait RecordWriter<R: Record> {
    fn write_next(&mut self, record: &R) -> crate::Result<()>;
}
