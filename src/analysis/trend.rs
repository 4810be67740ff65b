//! # Trend Module / 趋势模块
//!
//! Per-test trend analysis over duration, memory and rolling success rate.
//! Every value travels with the timestamp of the run it came from, so an
//! anomaly is reported at the time it actually happened.
//!
//! 针对每个测试的耗时、内存和滚动成功率进行趋势分析。
//! 每个数值都携带其所属运行的时间戳，因此异常会报告在其实际发生的时间。

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::analysis::history::{MetricHistory, TestMetric};
use crate::analysis::stats::{linear_fit, mean, population_std_dev, rolling_rate};

/// Number of consecutive runs in one success-rate window.
pub const ROLLING_WINDOW: usize = 5;
/// Values farther than this many standard deviations from the mean are anomalies.
pub const ANOMALY_SIGMAS: f64 = 2.0;

/// A value paired with the time of the run it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Direction of the fitted slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TrendDirection::Increasing => "Increasing",
            TrendDirection::Decreasing => "Decreasing",
            TrendDirection::Stable => "Stable",
        })
    }
}

/// Statistics of one series.
/// 单个序列的统计结果。
#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Slope of the least-squares line, per run.
    pub trend: f64,
    /// Timestamps of values more than two standard deviations from the mean.
    pub anomalies: Vec<NaiveDateTime>,
    /// Fitted value one step past the last run.
    pub prediction: f64,
}

impl TrendAnalysis {
    pub fn direction(&self) -> TrendDirection {
        if self.trend > 0.0 {
            TrendDirection::Increasing
        } else if self.trend < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

/// Analyzes a series. An empty series yields all zeros.
pub fn analyze_series(samples: &[Sample]) -> TrendAnalysis {
    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let mean = mean(&values);
    let std_dev = population_std_dev(&values);
    let fit = linear_fit(&values);

    let anomalies = samples
        .iter()
        .filter(|s| (s.value - mean).abs() > ANOMALY_SIGMAS * std_dev)
        .map(|s| s.timestamp)
        .collect();

    TrendAnalysis {
        mean,
        std_dev,
        trend: fit.slope,
        anomalies,
        prediction: if values.is_empty() {
            0.0
        } else {
            fit.at(values.len() as f64)
        },
    }
}

/// Rolling success rate over [`ROLLING_WINDOW`] runs. Each window carries the
/// timestamp of its last run. Empty when there are fewer runs than the window.
pub fn success_rate_series(metrics: &[TestMetric]) -> Vec<Sample> {
    let flags: Vec<bool> = metrics.iter().map(|m| m.success).collect();
    rolling_rate(&flags, ROLLING_WINDOW)
        .into_iter()
        .zip(metrics.iter().skip(ROLLING_WINDOW - 1))
        .map(|(value, metric)| Sample {
            timestamp: metric.timestamp,
            value,
        })
        .collect()
}

/// The three analyses of one test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestTrends {
    pub runs: usize,
    pub duration: TrendAnalysis,
    /// Bytes.
    pub memory: TrendAnalysis,
    /// `None` with fewer than [`ROLLING_WINDOW`] runs.
    pub success_rate: Option<TrendAnalysis>,
}

pub fn analyze_test(metrics: &[TestMetric]) -> TestTrends {
    let durations: Vec<Sample> = metrics
        .iter()
        .map(|m| Sample {
            timestamp: m.timestamp,
            value: m.duration,
        })
        .collect();
    let memory: Vec<Sample> = metrics
        .iter()
        .map(|m| Sample {
            timestamp: m.timestamp,
            value: m.memory,
        })
        .collect();
    let rates = success_rate_series(metrics);

    TestTrends {
        runs: metrics.len(),
        duration: analyze_series(&durations),
        memory: analyze_series(&memory),
        success_rate: (!rates.is_empty()).then(|| analyze_series(&rates)),
    }
}

/// Analyzes every test in the history, keeping its order.
pub fn analyze_all(history: &MetricHistory) -> IndexMap<String, TestTrends> {
    history
        .by_test
        .iter()
        .map(|(name, metrics)| (name.clone(), analyze_test(metrics)))
        .collect()
}
