use criterion::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use std::time::Instant;

use cff::*;
use capture_frame_formats as cff;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;
const SAMPLE_SIZE: usize = 22;

const CONVERSIONS: [PixelFormat; 6] = [
    PixelFormat::Rgb565,
    PixelFormat::Argb32,
    PixelFormat::Bgr24,
    PixelFormat::Yuyv,
    PixelFormat::Nv12m,
    PixelFormat::Yuv422m,
];

fn source_image(format: PixelFormat) -> Vec<u8> {
    let size = get_source_size(WIDTH, HEIGHT, format.descriptor())
        .expect("Unable to compute benchmark input size");

    let mut rng = StdRng::seed_from_u64(0);
    let mut image = vec![0_u8; size];
    rng.fill(&mut image[..]);

    image
}

fn timed<T>(iters: u64, mut f: impl FnMut() -> Result<T, ErrorKind>) -> Duration {
    let mut total = Duration::new(0, 0);
    for _i in 0..iters {
        let start = Instant::now();
        black_box(f().expect("Benchmark iteration failed"));
        total += start.elapsed();
    }

    total
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture-frame-formats");
    group.sample_size(SAMPLE_SIZE);
    group.throughput(Throughput::Elements(u64::from(WIDTH) * u64::from(HEIGHT)));

    for format in CONVERSIONS {
        let src = source_image(format);
        group.bench_function(format!("convert>{format}"), |b| {
            b.iter_custom(|iters| {
                timed(iters, || {
                    convert_image(WIDTH, HEIGHT, format.descriptor(), u8::MAX, &src)
                })
            });
        });
    }

    for format in [PixelFormat::Rgb24, PixelFormat::Uyvy] {
        let src = source_image(format);
        group.bench_function(format!("histogram>{format}"), |b| {
            b.iter_custom(|iters| {
                timed(iters, || {
                    compute_histogram(WIDTH, HEIGHT, format.descriptor(), &src)
                })
            });
        });

        group.bench_function(format!("compose>{format}"), |b| {
            b.iter_custom(|iters| {
                timed(iters, || compose_image(4, WIDTH, HEIGHT, format.descriptor(), &src))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
