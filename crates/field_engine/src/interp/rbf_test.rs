use glam::DVec3;

use super::*;

fn room_anchors() -> Vec<AnchorSample> {
  vec![
    AnchorSample {
      position: DVec3::new(0.0, 0.0, 0.0),
      value: 18.0,
    },
    AnchorSample {
      position: DVec3::new(3.0, 0.0, 1.0),
      value: 21.5,
    },
    AnchorSample {
      position: DVec3::new(1.0, 2.5, 2.0),
      value: 20.0,
    },
    AnchorSample {
      position: DVec3::new(2.0, 1.0, 0.5),
      value: 19.2,
    },
  ]
}

const KERNELS: [RbfKernel; 4] = [
  RbfKernel::Gaussian,
  RbfKernel::Multiquadric,
  RbfKernel::InverseMultiquadric,
  RbfKernel::ThinPlateSpline,
];

#[test]
fn exact_at_anchors_for_every_kernel() {
  let anchors = room_anchors();
  for kernel in KERNELS {
    let rbf = RbfEstimator::fit(anchors.clone(), kernel).unwrap();
    for a in &anchors {
      let v = rbf.estimate(a.position);
      assert!(
        (v - a.value).abs() < 1e-6,
        "{kernel:?} at {:?}: expected {}, got {v}",
        a.position,
        a.value
      );
    }
  }
}

#[test]
fn smooth_between_anchors() {
  let rbf = RbfEstimator::fit(room_anchors(), RbfKernel::Multiquadric).unwrap();

  // A query amid the anchors lands in a plausible neighborhood of the
  // anchor values (RBF may overshoot slightly; it must stay finite and
  // nearby, unlike IDW's hard bound).
  let v = rbf.estimate(DVec3::new(1.5, 1.0, 1.0));
  assert!(v.is_finite());
  assert!((15.0..=25.0).contains(&v), "got {v}");
}

#[test]
fn duplicate_anchors_rejected() {
  let mut anchors = room_anchors();
  anchors.push(anchors[0]);

  let result = RbfEstimator::fit(anchors, RbfKernel::Gaussian);
  assert!(matches!(
    result,
    Err(crate::error::FieldError::SingularSystem { .. })
  ));
}

#[test]
fn empty_samples_rejected() {
  assert!(matches!(
    RbfEstimator::fit(Vec::new(), RbfKernel::Gaussian),
    Err(crate::error::FieldError::NoAnchors)
  ));
}

#[test]
fn single_anchor_solves() {
  let rbf = RbfEstimator::fit(
    vec![AnchorSample {
      position: DVec3::ZERO,
      value: 7.0,
    }],
    RbfKernel::Gaussian,
  )
  .unwrap();

  assert!((rbf.estimate(DVec3::ZERO) - 7.0).abs() < 1e-12);
}

#[test]
fn values_stay_finite_on_a_grid() {
  let rbf = RbfEstimator::fit(room_anchors(), RbfKernel::ThinPlateSpline).unwrap();

  for i in 0..10 {
    for j in 0..10 {
      let q = DVec3::new(i as f64 * 0.4, j as f64 * 0.3, 1.0);
      assert!(rbf.estimate(q).is_finite());
    }
  }
}

#[test]
fn recovers_linear_ramp() {
  // Multiquadric RBFs reproduce smooth trends well; check a ramp along x
  // is tracked to within a loose tolerance at an interior point.
  let anchors: Vec<AnchorSample> = (0..5)
    .map(|i| AnchorSample {
      position: DVec3::new(i as f64, 0.0, 0.0),
      value: 10.0 + i as f64,
    })
    .collect();
  let rbf = RbfEstimator::fit(anchors, RbfKernel::Multiquadric).unwrap();

  let v = rbf.estimate(DVec3::new(1.5, 0.0, 0.0));
  assert!((v - 11.5).abs() < 0.2, "got {v}");
}
