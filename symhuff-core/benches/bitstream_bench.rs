//! Performance benchmarks for symhuff-core
//!
//! This benchmark suite evaluates:
//! - MSB-first bit packing and unpacking at typical Huffman code widths
//! - CRC-32 throughput across data sizes (slicing-by-8 vs short inputs)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use symhuff_core::bitstream::{BitReader, BitWriter};
use symhuff_core::crc::Crc32;

/// Data sizes for benchmarking
mod data_sizes {
    pub const TINY: usize = 16;
    pub const SMALL: usize = 256;
    pub const MEDIUM: usize = 4 * 1024;
    pub const LARGE: usize = 64 * 1024;
}

/// Generate (value, width) pairs resembling a Huffman code stream.
fn code_stream(count: usize) -> Vec<(u32, u8)> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..count)
        .map(|_| {
            // Linear congruential generator
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let width = 1 + ((seed >> 40) % 12) as u8;
            let value = (seed >> 8) as u32 & ((1u32 << width) - 1);
            (value, width)
        })
        .collect()
}

/// Benchmark writing variable-width codes
fn bench_write_codes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitwriter_codes");

    for count in [1_000usize, 100_000] {
        let codes = code_stream(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &codes, |b, codes| {
            b.iter(|| {
                let mut writer = BitWriter::new(Vec::with_capacity(count));
                for &(value, width) in codes {
                    writer.write_bits(value, width).unwrap();
                }
                black_box(writer.finish().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark bit-by-bit reading, the decoder's access pattern
fn bench_read_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitreader_single_bits");

    for size in [data_sizes::MEDIUM, data_sizes::LARGE] {
        let data: Vec<u8> = (0..size).map(|i| (i * 37) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut reader = BitReader::new(&data[..]);
                let mut ones = 0u64;
                while let Some(bit) = reader.try_read_bit().unwrap() {
                    ones += bit as u64;
                }
                black_box(ones);
            });
        });
    }

    group.finish();
}

/// Benchmark CRC-32 across different data sizes
fn bench_crc32_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32_sizes");

    let sizes = [
        ("16B", data_sizes::TINY),
        ("256B", data_sizes::SMALL),
        ("4KB", data_sizes::MEDIUM),
        ("64KB", data_sizes::LARGE),
    ];

    for (size_name, size) in sizes {
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| {
                let checksum = Crc32::compute(black_box(data));
                black_box(checksum);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_write_codes,
    bench_read_bits,
    bench_crc32_sizes
);
criterion_main!(benches);
