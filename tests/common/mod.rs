// Shared test helpers for integration tests
#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

use fw_test_runner::config::TestConfig;

/// A scratch directory that acts as build directory, output root and config
/// location at once.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempdir().expect("Failed to create temporary directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir().join("reports")
    }

    /// Writes a shell script into the workspace.
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
        path
    }

    /// A build script that leaves an `invoked_<category>` marker behind and
    /// fails for categories listed in `failing`.
    pub fn write_build_script(&self, failing: &[&str]) {
        let mut body = String::from("touch \"invoked_$1\"\n");
        for category in failing {
            body.push_str(&format!(
                "if [ \"$1\" = \"{category}\" ]; then echo 'error: build broke' >&2; exit 2; fi\n"
            ));
        }
        self.write_script("build.sh", &body);
    }

    /// Writes the config JSON into the workspace and returns its path.
    pub fn write_config(&self, config: &Value) -> PathBuf {
        let path = self.path().join("test_config.json");
        fs::write(&path, serde_json::to_string_pretty(config).unwrap())
            .expect("Failed to write config");
        path
    }

    /// A config whose build step is `build.sh` and whose test executables are
    /// `test_<category>.sh`, all inside the workspace.
    pub fn base_config(&self, categories: Value) -> Value {
        serde_json::json!({
            "general": {
                "outputDirectory": self.output_dir(),
                "tempDirectory": self.path().join("tmp"),
                "abortOnFailure": false,
                "generateReports": true,
                "buildDirectory": self.path(),
                "buildCommand": "sh ./build.sh {category}",
                "testCommand": "sh ./test_{category}.sh"
            },
            "categories": categories,
            "reporting": { "formats": ["json", "csv"], "retention": {} },
            "cleanup": { "enabled": false }
        })
    }

    pub fn load(&self, config: &Value) -> TestConfig {
        let path = self.write_config(config);
        fw_test_runner::config::load_config(&path).expect("Failed to load config")
    }

    pub fn was_invoked(&self, category: &str) -> bool {
        self.path().join(format!("invoked_{category}")).exists()
    }
}

/// Google-Test style output with the given passing and failing tests.
pub fn gtest_output(passed: &[&str], failed: &[&str]) -> String {
    let total = passed.len() + failed.len();
    let mut out = format!("[==========] Running {total} tests from 1 test suite.\n");
    for name in passed {
        out.push_str(&format!("[ RUN      ] {name}\n[ PASSED ] {name} (12 ms)\n"));
    }
    for name in failed {
        out.push_str(&format!("[ RUN      ] {name}\n[ FAILED ] {name} (30 ms)\n"));
    }
    out.push_str(&format!("[==========] {total} tests from 1 test suite ran. (42 ms total)\n"));
    out
}

/// Script body printing `output` verbatim, then exiting with `code`.
pub fn printing_script(output: &str, code: i32) -> String {
    format!("cat <<'__OUT__'\n{output}__OUT__\nexit {code}")
}
