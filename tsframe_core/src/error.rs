use std::fmt;
use std::io;

use thiserror::Error;

/// Which half of a frame write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    Length,
    Payload,
}

impl fmt::Display for WriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStep::Length => f.write_str("message length"),
            WriteStep::Payload => f.write_str("message"),
        }
    }
}

/// Everything that can go wrong reading or writing one frame.
///
/// [`FrameError::EndOfStream`] is not a failure: it is what a read loop
/// receives once the stream ends cleanly on a frame boundary. Every other
/// variant is fatal to the current call. After a `Framing` or `PayloadRead`
/// error the stream may be positioned mid-frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("end of stream")]
    EndOfStream,

    #[error("failed to read message size")]
    Framing(#[source] io::Error),

    #[error("failed to read message of {len} bytes")]
    PayloadRead {
        len: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode message")]
    Decode(#[source] anyhow::Error),

    #[error("failed to unmarshal message")]
    Unmarshal(#[source] anyhow::Error),

    #[error("failed to marshal message")]
    Marshal(#[source] anyhow::Error),

    #[error("unexpected size: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("failed to encode message")]
    Encode(#[source] anyhow::Error),

    #[error("encoded message of {0} bytes does not fit a 4-byte length prefix")]
    FrameTooLarge(usize),

    #[error("failed to write {step}")]
    Write {
        step: WriteStep,
        #[source]
        source: io::Error,
    },
}

impl FrameError {
    /// `true` for the clean end-of-data condition.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, FrameError::EndOfStream)
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_phase() {
        let e = FrameError::Write {
            step: WriteStep::Length,
            source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe"),
        };
        assert_eq!(e.to_string(), "failed to write message length");
        assert!(e.source().is_some());

        let e = FrameError::SizeMismatch {
            expected: 10,
            actual: 7,
        };
        assert_eq!(e.to_string(), "unexpected size: expected 10, got 7");
        assert!(!e.is_end_of_stream());
        assert!(FrameError::EndOfStream.is_end_of_stream());
    }

    #[test]
    fn anyhow_causes_are_exposed_as_source() {
        let e = FrameError::Decode(anyhow::anyhow!("corrupt input"));
        let source = e.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("corrupt input"));
    }
}
