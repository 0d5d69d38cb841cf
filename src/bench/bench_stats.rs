//! Summary statistics over sampling windows

/// Mean, spread and confidence margin of a set of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (zero for a single sample)
    pub std_dev: f64,
    /// Standard error of the mean
    pub std_error: f64,
    /// Half-width of the confidence interval, `z * std_error`
    pub margin: f64,
}

impl Summary {
    /// Summarize samples; all fields are zero when there are none
    pub fn from_samples(samples: &[f64], z: f64) -> Self {
        if samples.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                std_dev: 0.0,
                std_error: 0.0,
                margin: 0.0,
            };
        }
        let count = samples.len();
        let n = count as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let std_dev = if count > 1 {
            let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };
        let std_error = std_dev / n.sqrt();

        Self {
            count,
            mean,
            std_dev,
            std_error,
            margin: z * std_error,
        }
    }

    /// Margin as a percentage of the mean
    pub fn margin_percent(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.margin / self.mean * 100.0
        }
    }
}
