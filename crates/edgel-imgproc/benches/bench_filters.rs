use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use edgel_image::Image;
use edgel_imgproc::filter::{gaussian_blur, kernels, separable_filter};
use edgel_imgproc::gradient::GradientField;
use edgel_imgproc::parallel::ExecutionStrategy;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for sigma in [1.0f32, 2.0, 3.0].iter() {
            let kernel = kernels::gaussian_kernel_1d(*sigma).unwrap();
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * kernel.len()) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, sigma);

            let image_size = [*width, *height].into();
            let image_data = (0..width * height).map(|i| (i % 255) as f32 / 255.0).collect();
            let image = Image::<f32, 1>::new(image_size, image_data).unwrap();
            let output = Image::<f32, 1>::from_size_val(image_size, 0.0).unwrap();

            for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
                group.bench_with_input(
                    BenchmarkId::new(format!("gaussian_blur_{strategy:?}"), &parameter_string),
                    &(&image, &output),
                    |b, i| {
                        let (src, mut dst) = (i.0, i.1.clone());
                        b.iter(|| black_box(gaussian_blur(src, &mut dst, *sigma, strategy)))
                    },
                );
            }

            group.bench_with_input(
                BenchmarkId::new("separable_filter", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(separable_filter(
                            src,
                            &mut dst,
                            &kernel,
                            &kernel,
                            ExecutionStrategy::Auto,
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gradient");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let image_data = (0..width * height).map(|i| (i % 97) as f32 / 97.0).collect();
        let image = Image::<f32, 1>::new(image_size, image_data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("gradient_field", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(GradientField::compute(i, ExecutionStrategy::Auto))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filters, bench_gradient);
criterion_main!(benches);
