use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nas_lcd::{
    format::{fit_line, format_bytes, format_key_value, format_utilization},
    metrics::data::{DiskUsage, InterfaceInfo},
    pages,
};
use std::hint::black_box;

/// Benchmark key/value lines across common display widths
fn bench_key_value(c: &mut Criterion) {
    for width in [16_usize, 20, 40].iter() {
        c.bench_with_input(BenchmarkId::new("format_key_value", width), width, |b, &width| {
            b.iter(|| {
                format_key_value(
                    black_box("hst"),
                    black_box("  storage-appliance.home.arpa  "),
                    width,
                )
            })
        });
    }
}

/// Benchmark byte scaling with and without a promotion threshold
fn bench_format_bytes(c: &mut Criterion) {
    c.bench_function("format_bytes_plain", |b| {
        b.iter(|| format_bytes(black_box(12_345_678_901), 0, 1.0))
    });

    c.bench_function("format_bytes_threshold", |b| {
        b.iter(|| format_bytes(black_box(12_345_678_901), 2, 9.0))
    });

    c.bench_function("format_utilization", |b| {
        b.iter(|| format_utilization(black_box(3_100_000_000), black_box(8_000_000_000), 38.75))
    });
}

/// Benchmark raw line fitting
fn bench_fit_line(c: &mut Criterion) {
    c.bench_function("fit_line", |b| {
        b.iter(|| fit_line(black_box("\teth0 CONNECTED and more "), 16))
    });
}

/// Benchmark page layout for the connectivity and disk stages
fn bench_page_layout(c: &mut Criterion) {
    let interfaces = vec![
        InterfaceInfo {
            name: "lo".to_string(),
            is_up: true,
            addresses: vec!["127.0.0.1".to_string()],
        },
        InterfaceInfo {
            name: "wlan0".to_string(),
            is_up: true,
            addresses: vec!["192.168.1.20".to_string()],
        },
        InterfaceInfo {
            name: "eth0".to_string(),
            is_up: false,
            addresses: Vec::new(),
        },
    ];
    let preferred = vec!["eth0".to_string(), "wlan0".to_string()];

    c.bench_function("connectivity_lines", |b| {
        b.iter(|| pages::connectivity_lines(black_box(&interfaces), black_box(&preferred)))
    });

    let usage = DiskUsage::from_available(4_000_000_000_000, 1_547_200_000_000);
    c.bench_function("disk_lines", |b| {
        b.iter(|| pages::disk_lines(black_box("/dev/sdb1"), Some(("ext4", usage))))
    });

    let devices: Vec<String> = (0..24).rev().map(|i| format!("/dev/sd{}", i % 12)).collect();
    c.bench_function("resolve_disks", |b| {
        b.iter(|| pages::resolve_disks(black_box(devices.clone())))
    });
}

criterion_group!(
    benches,
    bench_key_value,
    bench_format_bytes,
    bench_fit_line,
    bench_page_layout
);
criterion_main!(benches);
