use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use procimag_image::{Image, Raster};
use procimag_imgproc::{
    color::{adjust_hue, gray_from_rgb_weighted, gray_from_rgba, luma, GrayWeights},
    histogram::equalize_histogram,
};

// vanilla version
fn gray_vanilla(src: &Raster, dst: &mut Image<f32, 1>) -> Result<(), Box<dyn std::error::Error>> {
    let cols = src.cols();
    let data = dst.as_slice_mut();

    for y in 0..src.rows() {
        for x in 0..cols {
            data[y * cols + x] = luma(src.pixel(x, y)?);
        }
    }
    Ok(())
}

fn bench_grayscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grayscale");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let data = (0..width * height * 4).map(|i| (i % 253) as u8).collect();
        let image = Raster::new([*width, *height].into(), data).unwrap();
        let plane = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
        let output = Raster::from_size_val(image.size(), 0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("luma_vanilla", &parameter_string),
            &(&image, &plane),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(gray_vanilla(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("luma_par_rows", &parameter_string),
            &(&image, &plane),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(gray_from_rgba(src, &mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("gray_weighted_linear", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(gray_from_rgb_weighted(src, &mut dst, GrayWeights::BT601)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("adjust_hue", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(adjust_hue(src, &mut dst, 45.0)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("equalize_histogram", &parameter_string),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(equalize_histogram(src, &mut dst)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_grayscale);
criterion_main!(benches);
