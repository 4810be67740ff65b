//! # Analysis Module / 分析模块
//!
//! The trend analyzer: reads historical JSON reports back, computes per-test
//! statistics and renders a text report plus one plot per test.
//!
//! 趋势分析器：读取历史 JSON 报告，计算每个测试的统计数据，
//! 并生成文本报告和每个测试的图表。

pub mod history;
pub mod plot;
pub mod report;
pub mod stats;
pub mod trend;

pub use history::{MetricHistory, TestMetric};
pub use trend::{TestTrends, TrendAnalysis, analyze_all};
