use std::io::Write;

use codec_pipeline::compression::{compress, decompress, StreamCompressor};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn generate_text(size_kb: usize) -> Vec<u8> {
    let base = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nVary: Accept-Encoding\r\n\r\n{\"id\":42,\"name\":\"layered codecs\",\"tags\":[\"gzip\",\"br\",\"zstd\"]}\n";
    let mut text = Vec::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.extend_from_slice(base.as_bytes());
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_single_codecs(c: &mut Criterion) {
    let text_64k = generate_text(64);
    for name in ["gzip", "zlib", "deflate", "br", "zstd", "compress"] {
        c.bench_function(&format!("compress_{name}_64kb"), |b| {
            b.iter(|| black_box(compress(black_box(&text_64k), None, &[name])))
        });

        let encoded = compress(&text_64k, None, &[name]).unwrap();
        c.bench_function(&format!("decompress_{name}_64kb"), |b| {
            b.iter(|| black_box(decompress(black_box(&encoded), None, &[name])))
        });
    }
}

fn bench_stacked(c: &mut Criterion) {
    let text_64k = generate_text(64);
    let order = ["gzip", "deflate", "br", "zstd"];
    c.bench_function("compress_stack4_64kb", |b| {
        b.iter(|| black_box(compress(black_box(&text_64k), None, &order)))
    });

    let encoded = compress(&text_64k, None, &order).unwrap();
    c.bench_function("decompress_stack4_64kb", |b| {
        b.iter(|| black_box(decompress(black_box(&encoded), None, &order)))
    });
}

fn bench_streaming_writes(c: &mut Criterion) {
    let text_256k = generate_text(256);
    c.bench_function("stream_gzip_zstd_256kb_4k_chunks", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            let mut compressor = StreamCompressor::new(&mut out, ["gzip", "zstd"]);
            for chunk in text_256k.chunks(4096) {
                compressor.write_all(chunk).unwrap();
            }
            compressor.close().unwrap();
            drop(compressor);
            black_box(out)
        })
    });
}

criterion_group!(benches, bench_single_codecs, bench_stacked, bench_streaming_writes);
criterion_main!(benches);
