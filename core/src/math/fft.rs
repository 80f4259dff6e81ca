use num_complex::Complex32;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Wraps the `rustfft` planner so a stage can reuse one plan across runs.
pub struct FftHelper {
    fft: Arc<dyn Fft<f32>>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transforms `input`, zero-padding or truncating to the planned size.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex32> {
        let mut buffer: Vec<Complex32> = input
            .iter()
            .take(self.size)
            .map(|&value| Complex32::new(value, 0.0))
            .collect();
        buffer.resize(self.size, Complex32::zero());
        self.fft.process(&mut buffer);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fft_helper_returns_planned_length() {
        let helper = FftHelper::new(8);
        let output = helper.forward(&[1.0, 0.0, -1.0, 0.0]);
        assert_eq!(output.len(), 8);
    }

    #[test]
    fn fft_helper_puts_constant_signal_in_dc_bin() {
        let helper = FftHelper::new(4);
        let output = helper.forward(&[1.0, 1.0, 1.0, 1.0]);
        assert!((output[0].norm() - 4.0).abs() < 1e-5);
        assert!(output[1].norm() < 1e-5);
    }
}
