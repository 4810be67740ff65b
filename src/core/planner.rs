//! # Execution Planner Module / 执行计划模块
//!
//! Decides which configured categories run, and in which order, before any
//! process is started.
//!
//! 在启动任何进程之前，决定哪些已配置的类别需要运行以及运行顺序。

use crate::core::config::{CategorySettings, TestConfig};

/// The categories selected for one run.
/// 一次运行所选中的类别。
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    /// Enabled categories in configuration order.
    /// 按配置顺序排列的已启用类别。
    pub categories: Vec<(String, CategorySettings)>,
    /// Selected categories that are disabled in the configuration.
    /// 被选中但在配置中禁用的类别。
    pub disabled: Vec<String>,
    /// Names given on the command line that the configuration does not define.
    /// 命令行中给出但配置中未定义的名称。
    pub unknown: Vec<String>,
}

impl ExecutionPlan {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Builds the plan from the configuration and an optional subset of category
/// names. Configuration order is kept regardless of the order of `selected`.
pub fn plan_execution(config: &TestConfig, selected: Option<&[String]>) -> ExecutionPlan {
    let mut plan = ExecutionPlan::default();

    for (name, settings) in &config.categories {
        if let Some(selected) = selected {
            if !selected.iter().any(|s| s == name) {
                continue;
            }
        }
        if settings.enabled {
            plan.categories.push((name.clone(), settings.clone()));
        } else {
            plan.disabled.push(name.clone());
        }
    }

    if let Some(selected) = selected {
        plan.unknown = selected
            .iter()
            .filter(|s| !config.categories.contains_key(s.as_str()))
            .cloned()
            .collect();
    }

    plan
}
