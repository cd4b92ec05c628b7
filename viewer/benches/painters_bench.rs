//! Painter throughput benchmarks
//!
//! Measures one `paint` call per demo pattern at common window sizes.

use std::path::PathBuf;

use cpf::{Dimensions, Painter, Rgba8};
use cpf_viewer::painters::{build_painter, ImagePainter, PainterKind};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::RgbaImage;

const SIZES: [(usize, usize); 3] = [(320, 240), (640, 640), (1920, 1080)];

const PATTERNS: [PainterKind; 4] = [
    PainterKind::Gradient,
    PainterKind::Bands,
    PainterKind::Alignment,
    PainterKind::Line,
];

fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint");

    for (width, height) in SIZES {
        let dimensions = Dimensions::new(width, height).unwrap();
        group.throughput(Throughput::Elements(dimensions.pixel_count() as u64));

        for kind in PATTERNS {
            let mut painter = build_painter(kind, dimensions, None).unwrap();
            let mut pixels: Vec<Rgba8> = vec![[0; 4]; dimensions.pixel_count()];
            group.bench_with_input(
                BenchmarkId::new(format!("{kind:?}"), dimensions),
                &dimensions,
                |b, _| b.iter(|| painter.paint(black_box(&mut pixels))),
            );
        }
    }

    group.finish();
}

fn scale(source: &RgbaImage, dimensions: Dimensions) -> ImagePainter {
    ImagePainter::from_rgba(PathBuf::from("bench.png"), source.clone(), dimensions).unwrap()
}

fn bench_image(c: &mut Criterion) {
    let raw: Vec<u8> = (0..256 * 256 * 4).map(|i| i as u8).collect();
    let source = RgbaImage::from_raw(256, 256, raw).unwrap();

    let mut group = c.benchmark_group("image");
    for (width, height) in SIZES {
        let dimensions = Dimensions::new(width, height).unwrap();
        group.bench_with_input(
            BenchmarkId::new("scale", dimensions),
            &dimensions,
            |b, &dimensions| b.iter(|| scale(black_box(&source), dimensions)),
        );

        let mut painter = scale(&source, dimensions);
        let mut pixels: Vec<Rgba8> = vec![[0; 4]; dimensions.pixel_count()];
        group.bench_with_input(
            BenchmarkId::new("paint", dimensions),
            &dimensions,
            |b, _| b.iter(|| painter.paint(black_box(&mut pixels))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_patterns, bench_image);
criterion_main!(benches);
