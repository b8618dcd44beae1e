//! Sensor smoothing
//!
//! Raw orientation/motion events are noisy. Each signal group keeps the last
//! `W` samples and every axis is low-pass filtered by a fixed Gaussian
//! kernel. History is ordered oldest first, newest last.

use std::collections::VecDeque;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::deg_to_rad;

/// Largest accepted smoothing window
pub const MAX_SMOOTH_LENGTH: usize = 1024;

/// Normalised Gaussian weights for a window of `window` samples.
///
/// `gauss(i * 2 / window)` for each slot, divided by the total, then
/// reversed so the heaviest weight lines up with the newest sample.
///
/// # Panics
/// If `window` is zero.
pub fn gaussian_kernel(window: usize) -> Vec<f64> {
    assert!(window >= 1, "smoothing window must hold at least one sample");

    let gauss = |x: f64| (-x * x / 2.0).exp();
    let mut weights: Vec<f64> = (0..window)
        .map(|i| gauss(i as f64 * 2.0 / window as f64))
        .collect();
    let total: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= total);
    weights.reverse();
    weights
}

/// Weighted sum of `history` against `kernel`.
///
/// The sum is divided by the kernel total accumulated in the same order,
/// so rounding in the normalised weights cannot bias the result: a history
/// of ones smooths to exactly 1.
///
/// # Panics
/// If the two slices differ in length.
pub fn smooth(history: &[f64], kernel: &[f64]) -> f64 {
    assert_eq!(
        history.len(),
        kernel.len(),
        "history and kernel lengths differ"
    );
    let (weighted, total) = history
        .iter()
        .zip(kernel)
        .fold((0.0, 0.0), |(acc, total), (x, w)| (acc + x * w, total + w));
    weighted / total
}

/// Fixed-length sliding window of samples, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleHistory<T> {
    samples: VecDeque<T>,
}

impl<T: Clone + Default> SampleHistory<T> {
    /// A window of `window` default (zero) samples
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "smoothing window must hold at least one sample");
        Self {
            samples: std::iter::repeat_n(T::default(), window).collect(),
        }
    }
}

impl<T> SampleHistory<T> {
    /// Drop the oldest sample and append `sample` as the newest
    pub fn push(&mut self, sample: T) {
        self.samples.pop_front();
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn newest(&self) -> Option<&T> {
        self.samples.back()
    }

    /// One scalar axis across the window, oldest first
    pub fn axis(&self, f: impl Fn(&T) -> f64) -> Vec<f64> {
        self.samples.iter().map(f).collect()
    }

    /// Smoothed value of one axis
    pub fn smoothed(&self, kernel: &[f64], f: impl Fn(&T) -> f64) -> f64 {
        smooth(&self.axis(f), kernel)
    }
}

/// A raw device orientation reading (degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    /// Whether angles are relative to the Earth frame
    pub absolute: bool,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Smoothed orientation (radians)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub absolute: bool,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Orientation {
    /// Smooth every axis of an orientation history and convert to radians
    pub fn from_history(history: &SampleHistory<OrientationSample>, kernel: &[f64]) -> Self {
        Self {
            absolute: history.newest().is_some_and(|s| s.absolute),
            alpha: deg_to_rad(history.smoothed(kernel, |s| s.alpha)),
            beta: deg_to_rad(history.smoothed(kernel, |s| s.beta)),
            gamma: deg_to_rad(history.smoothed(kernel, |s| s.gamma)),
        }
    }
}

/// Smooth every axis of an acceleration history
pub fn smoothed_acceleration(history: &SampleHistory<DVec3>, kernel: &[f64]) -> DVec3 {
    DVec3::new(
        history.smoothed(kernel, |a| a.x),
        history.smoothed(kernel, |a| a.y),
        history.smoothed(kernel, |a| a.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_kernel_is_reversed_gaussian() {
        let kernel = gaussian_kernel(8);
        assert_eq!(kernel.len(), 8);
        // Newest slot carries the largest weight
        for pair in kernel.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        let ratio = kernel[0] / kernel[7];
        let expected = (-(7.0_f64 * 2.0 / 8.0).powi(2) / 2.0).exp();
        assert!((ratio - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_kernel() {
        assert_eq!(gaussian_kernel(1), vec![1.0]);
    }

    #[test]
    #[should_panic(expected = "at least one sample")]
    fn test_empty_kernel_panics() {
        gaussian_kernel(0);
    }

    #[test]
    fn test_constant_history_is_fixed_point() {
        assert_eq!(smooth(&[1.0; 8], &gaussian_kernel(8)), 1.0);
    }

    #[test]
    #[should_panic(expected = "lengths differ")]
    fn test_mismatched_lengths_panic() {
        smooth(&[1.0, 2.0], &gaussian_kernel(3));
    }

    #[test]
    fn test_history_slides() {
        let mut history: SampleHistory<f64> = SampleHistory::new(3);
        assert_eq!(history.axis(|x| *x), vec![0.0, 0.0, 0.0]);
        history.push(1.0);
        history.push(2.0);
        history.push(3.0);
        history.push(4.0);
        assert_eq!(history.len(), 3);
        assert_eq!(history.axis(|x| *x), vec![2.0, 3.0, 4.0]);
        assert_eq!(history.newest(), Some(&4.0));
    }

    #[test]
    fn test_orientation_converts_to_radians() {
        let kernel = gaussian_kernel(4);
        let mut history = SampleHistory::new(4);
        for _ in 0..4 {
            history.push(OrientationSample {
                absolute: true,
                alpha: 180.0,
                beta: 90.0,
                gamma: -90.0,
            });
        }
        let o = Orientation::from_history(&history, &kernel);
        assert!(o.absolute);
        assert!((o.alpha - std::f64::consts::PI).abs() < 1e-9);
        assert!((o.beta - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((o.gamma + std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_single_event_is_damped() {
        let kernel = gaussian_kernel(8);
        let mut history = SampleHistory::new(8);
        history.push(DVec3::new(8.0, 0.0, 0.0));
        let a = smoothed_acceleration(&history, &kernel);
        assert!((a.x - 8.0 * kernel[7]).abs() < 1e-12);
        assert!(a.x < 8.0);
    }

    proptest! {
        #[test]
        fn prop_kernel_weights_sum_to_one(window in 1usize..256) {
            let kernel = gaussian_kernel(window);
            prop_assert_eq!(kernel.len(), window);
            prop_assert!(kernel.iter().all(|&w| w >= 0.0));
            let total: f64 = kernel.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_smooth_is_linear(
            history in prop::collection::vec(-100.0f64..100.0, 8),
            c in -10.0f64..10.0,
        ) {
            let kernel = gaussian_kernel(8);
            let scaled: Vec<f64> = history.iter().map(|x| x * c).collect();
            let lhs = smooth(&scaled, &kernel);
            let rhs = c * smooth(&history, &kernel);
            prop_assert!((lhs - rhs).abs() < 1e-9);
        }

        #[test]
        fn prop_ones_smooth_to_exactly_one(window in 1usize..=MAX_SMOOTH_LENGTH) {
            let kernel = gaussian_kernel(window);
            prop_assert_eq!(smooth(&vec![1.0; window], &kernel), 1.0);
        }

        #[test]
        fn prop_constant_history(v in -1000.0f64..1000.0, window in 1usize..32) {
            let kernel = gaussian_kernel(window);
            let history = vec![v; window];
            prop_assert!((smooth(&history, &kernel) - v).abs() < 1e-9);
        }
    }
}
