use std::io::Cursor;

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use tsframe_codecs::codec_by_name;
use tsframe_core::{FramedCodec, Label, Sample, TimeSeries};

fn batch(n: usize) -> Vec<TimeSeries> {
    (0..n)
        .map(|i| TimeSeries {
            labels: vec![
                Label::new("__name__", "node_network_receive_bytes_total"),
                Label::new("instance", format!("host-{}:9100", i % 100)),
                Label::new("device", format!("eth{}", i % 4)),
            ],
            samples: (0..10)
                .map(|j| Sample {
                    value: (i * j) as f64,
                    timestamp: 1_500_000_000_000 + j as i64 * 15_000,
                })
                .collect(),
        })
        .collect()
}

fn encode_all(codec: &str, records: &[TimeSeries]) -> Vec<u8> {
    let mut w = FramedCodec::new(Cursor::new(Vec::new()), codec_by_name(codec, 3).unwrap());
    for ts in records {
        w.write_next(ts).unwrap();
    }
    w.into_inner().into_inner()
}

fn bench_write(c: &mut Criterion) {
    let records = batch(1000);
    let mut group = c.benchmark_group("write_next");
    group.throughput(Throughput::Elements(records.len() as u64));
    for codec in ["snappy", "lz4", "zstd"] {
        group.bench_with_input(BenchmarkId::from_parameter(codec), &records, |b, records| {
            b.iter(|| black_box(encode_all(codec, records)));
        });
    }
    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let records = batch(1000);
    let mut group = c.benchmark_group("read_next");
    group.throughput(Throughput::Elements(records.len() as u64));
    for codec in ["snappy", "lz4", "zstd"] {
        let data = encode_all(codec, &records);
        group.bench_with_input(BenchmarkId::from_parameter(codec), &data, |b, data| {
            b.iter_batched(
                || data.clone(),
                |data| {
                    let mut r = FramedCodec::new(Cursor::new(data), codec_by_name(codec, 3).unwrap());
                    let mut n = 0usize;
                    for ts in r.records::<TimeSeries>() {
                        n += black_box(ts.unwrap()).samples.len();
                    }
                    n
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
