//! Small statistics helpers over in-memory series.

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Degree-1 least-squares fit `y = slope * x + intercept` over `x = 0..n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over the index sequence. With one value or none the
/// slope is 0 and the intercept is the mean.
pub fn linear_fit(values: &[f64]) -> LinearFit {
    let n = values.len();
    if n <= 1 {
        return LinearFit {
            slope: 0.0,
            intercept: mean(values),
        };
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);
    let (mut num, mut den) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    let slope = num / den;
    LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    }
}

/// Fraction of `true` in every window of `window` consecutive flags.
/// Empty when there are fewer flags than the window size.
pub fn rolling_rate(flags: &[bool], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    flags
        .windows(window)
        .map(|w| w.iter().filter(|&&ok| ok).count() as f64 / window as f64)
        .collect()
}
