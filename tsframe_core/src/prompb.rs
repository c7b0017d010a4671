//! Prometheus remote-write time series, the record type the load tool
//! replays.
//!
//! Field tags match `prometheus/prompb/types.proto`, so frames written here
//! decode with any remote-write compatible protobuf implementation.

use anyhow::Context;
use prost::Message;

use crate::record::Record;

#[derive(Clone, PartialEq, Message)]
pub struct Label {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct Sample {
    #[prost(double, tag = "1")]
    pub value: f64,
    /// Milliseconds since the Unix epoch.
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct TimeSeries {
    #[prost(message, repeated, tag = "1")]
    pub labels: Vec<Label>,
    #[prost(message, repeated, tag = "2")]
    pub samples: Vec<Sample>,
}

impl Label {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl TimeSeries {
    /// Value of the `__name__` label, if present.
    pub fn metric_name(&self) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.name == "__name__")
            .map(|l| l.value.as_str())
    }
}

impl Record for TimeSeries {
    fn size(&self) -> usize {
        self.encoded_len()
    }

    fn marshal_to(&self, buf: &mut [u8]) -> anyhow::Result<usize> {
        let capacity = buf.len();
        let mut dst: &mut [u8] = buf;
        self.encode(&mut dst)
            .context("protobuf encode into frame buffer")?;
        Ok(capacity - dst.len())
    }

    fn unmarshal(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(Self::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TimeSeries {
        TimeSeries {
            labels: vec![
                Label::new("__name__", "http_requests_total"),
                Label::new("instance", "host-1:9100"),
            ],
            samples: vec![
                Sample {
                    value: 1.5,
                    timestamp: 1_500_000_000_000,
                },
                Sample {
                    value: -0.25,
                    timestamp: 1_500_000_015_000,
                },
            ],
        }
    }

    #[test]
    fn marshal_fills_exactly_size_bytes() {
        let ts = series();
        let mut buf = vec![0u8; ts.size()];
        let n = ts.marshal_to(&mut buf).unwrap();
        assert_eq!(n, ts.size());
        assert_eq!(TimeSeries::unmarshal(&buf).unwrap(), ts);
        assert_eq!(ts.metric_name(), Some("http_requests_total"));
    }

    #[test]
    fn marshal_into_short_buffer_fails() {
        let ts = series();
        let mut buf = vec![0u8; ts.size() - 1];
        assert!(ts.marshal_to(&mut buf).is_err());
    }

    #[test]
    fn unmarshal_rejects_garbage() {
        // Field 1, wire type 2 (length-delimited) claiming 100 bytes.
        assert!(TimeSeries::unmarshal(&[0x0A, 100, 1, 2]).is_err());
    }
}
