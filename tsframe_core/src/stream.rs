use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};

/// Byte stream a codec reads frames from and writes frames to.
///
/// Beyond sequential I/O the codec only needs two queries, both used for
/// progress reporting: where the cursor is, and how large the whole stream
/// is. Neither is ever used to seek.
pub trait Stream: Read + Write {
    /// Current cursor position in bytes from the start of the stream.
    fn offset(&mut self) -> io::Result<u64>;

    /// Total stream length in bytes. `Ok(0)` means unknown.
    fn total_size(&mut self) -> io::Result<u64> {
        Ok(0)
    }
}

impl Stream for File {
    fn offset(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn total_size(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

impl<T> Stream for Cursor<T>
where
    T: AsRef<[u8]>,
    Cursor<T>: Write,
{
    fn offset(&mut self) -> io::Result<u64> {
        Ok(self.position())
    }

    fn total_size(&mut self) -> io::Result<u64> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

impl<S: Stream + ?Sized> Stream for &mut S {
    fn offset(&mut self) -> io::Result<u64> {
        (**self).offset()
    }

    fn total_size(&mut self) -> io::Result<u64> {
        (**self).total_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reports_position_and_length() {
        let mut c = Cursor::new(vec![0u8; 40]);
        let mut head = [0u8; 12];
        c.read_exact(&mut head).unwrap();
        assert_eq!(c.offset().unwrap(), 12);
        assert_eq!(c.total_size().unwrap(), 40);
    }

    #[test]
    fn file_reports_metadata_length() {
        let path = std::env::temp_dir().join("tsframe_stream_file_len.bin");
        std::fs::write(&path, [7u8; 25]).unwrap();
        let mut f = File::options().read(true).write(true).open(&path).unwrap();
        assert_eq!(f.total_size().unwrap(), 25);
        let mut buf = [0u8; 5];
        f.read_exact(&mut buf).unwrap();
        assert_eq!(f.offset().unwrap(), 5);
        let _ = std::fs::remove_file(&path);
    }
}
