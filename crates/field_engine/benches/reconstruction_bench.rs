//! Benchmarks for the reconstruction hot paths: lattice classification
//! against the BVH and field interpolation over the accepted points.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;

use field_engine::classify::{classify_points, ClassifierConfig};
use field_engine::geometry::{shapes, GeometryIndex};
use field_engine::interp::{build_estimator, EstimatorParams};
use field_engine::sensors::AnchorSample;
use field_engine::{Aabb, InterpolationMethod, Lattice, RbfKernel};

/// Scattered anchors roughly matching a sensor deployment in a room.
fn room_samples(count: usize) -> Vec<AnchorSample> {
  (0..count)
    .map(|i| {
      let f = i as f64;
      AnchorSample {
        position: DVec3::new(
          (f * 0.737).sin() * 2.0 + 2.0,
          (f * 1.193).cos() * 1.2 + 1.4,
          (f * 0.389).sin() * 2.5 + 2.5,
        ),
        value: 18.0 + (f * 0.917).sin() * 4.0,
      }
    })
    .collect()
}

fn bench_classification(c: &mut Criterion) {
  let index = GeometryIndex::build(&shapes::unit_cube());
  let config = ClassifierConfig::default();

  let mut group = c.benchmark_group("classify_lattice");
  for resolution in [0.1, 0.05] {
    let bounds = Aabb::new(DVec3::splat(-0.5), DVec3::splat(1.5));
    let lattice = Lattice::generate(bounds, resolution);
    group.bench_with_input(
      BenchmarkId::from_parameter(format!("res {resolution}")),
      &lattice,
      |b, lattice| {
        b.iter(|| {
          let outcome =
            classify_points(&index, black_box(&lattice.points), &config, 2048, |_, _| {});
          black_box(outcome)
        })
      },
    );
  }
  group.finish();
}

fn bench_interpolation(c: &mut Criterion) {
  let samples = room_samples(12);
  let bounds = Aabb::new(DVec3::ZERO, DVec3::new(4.0, 2.8, 5.0));
  let lattice = Lattice::generate(bounds, 0.2);

  let idw = EstimatorParams {
    method: InterpolationMethod::Idw,
    idw_power: 2.0,
    rbf_kernel: RbfKernel::Gaussian,
  };
  let rbf = EstimatorParams {
    method: InterpolationMethod::Rbf,
    idw_power: 2.0,
    rbf_kernel: RbfKernel::Multiquadric,
  };

  let mut group = c.benchmark_group("interpolate_field");
  for (name, params) in [("idw", idw), ("rbf", rbf)] {
    group.bench_function(name, |b| {
      b.iter(|| {
        let estimator = build_estimator(black_box(&samples), &params).unwrap();
        let values: Vec<f64> = lattice
          .points
          .chunks_exact(3)
          .map(|p| estimator.estimate(DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64)))
          .collect();
        black_box(values)
      })
    });
  }
  group.finish();
}

fn bench_rbf_fit(c: &mut Criterion) {
  let mut group = c.benchmark_group("rbf_fit");
  for count in [8, 24, 64] {
    let samples = room_samples(count);
    let params = EstimatorParams {
      method: InterpolationMethod::Rbf,
      idw_power: 2.0,
      rbf_kernel: RbfKernel::Multiquadric,
    };
    group.bench_with_input(BenchmarkId::from_parameter(count), &samples, |b, samples| {
      b.iter(|| black_box(build_estimator(black_box(samples), &params).unwrap()))
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_classification,
  bench_interpolation,
  bench_rbf_fit
);
criterion_main!(benches);
