//! # Command Module / 命令模块
//!
//! Builds child processes from command templates and captures their output.
//! Environment for a child is set on its own `Command`; the runner's process
//! environment is never modified.
//!
//! 根据命令模板构建子进程并捕获其输出。
//! 子进程的环境变量只设置在其自身的 `Command` 上，从不修改运行器进程的环境。

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use indexmap::IndexMap;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::core::config::CATEGORY_PLACEHOLDER;
use crate::error::{HarnessError, Result};

/// Environment variable naming the category under test.
pub const CATEGORY_ENV_VAR: &str = "TEST_CATEGORY";

/// Output and exit status of a finished child process.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// stdout followed by stderr, for logs.
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }
}

/// A fully expanded command line, ready to be turned into a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Substitutes `{category}`, expands `~` and environment variables, then
    /// splits the result with shell quoting rules.
    ///
    /// 替换 `{category}`，展开 `~` 和环境变量，然后按 shell 引号规则拆分。
    pub fn from_template(template: &str, category: &str) -> Result<Self> {
        let substituted = template.replace(CATEGORY_PLACEHOLDER, category);
        let expanded = shellexpand::full(&substituted)
            .map_err(|e| HarnessError::InvalidCommand {
                command: substituted.clone(),
                reason: e.to_string(),
            })?
            .to_string();

        let mut parts = shlex::split(&expanded).ok_or_else(|| HarnessError::InvalidCommand {
            command: expanded.clone(),
            reason: "unbalanced quotes".to_string(),
        })?;
        if parts.is_empty() {
            return Err(HarnessError::InvalidCommand {
                command: expanded,
                reason: "empty command".to_string(),
            });
        }

        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }

    /// Creates the process command. Relative programs containing a path
    /// separator (such as `./test_unit`) resolve against `working_dir`; bare
    /// names are looked up on `PATH`.
    pub fn to_command(&self, working_dir: &Path, env: &IndexMap<String, String>) -> Result<Command> {
        let working_dir = std::path::absolute(working_dir)?;
        let program = resolve_program(&self.program, &working_dir);

        let mut cmd = Command::new(program);
        cmd.args(&self.args)
            .envs(env.iter())
            .current_dir(&working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        Ok(cmd)
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        f.write_str(&shlex::try_join(parts).unwrap_or_else(|_| self.program.clone()))
    }
}

fn resolve_program(program: &str, working_dir: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        working_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Spawns a command and captures stdout and stderr separately.
/// Both streams are read line by line on their own tasks so a chatty child
/// cannot block on a full pipe. Dropping the returned future kills the child
/// and aborts both reader tasks, even when a grandchild still holds the pipes.
///
/// 派生一个命令，分别捕获 stdout 和 stderr。
/// 两个流在各自的任务中逐行读取，避免子进程因管道写满而阻塞。
/// 丢弃返回的 future 会终止子进程并中止两个读取任务。
pub async fn spawn_and_capture(mut cmd: Command) -> std::io::Result<CapturedOutput> {
    let mut child = cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

    let mut stdout_reader = read_lines(stdout);
    let mut stderr_reader = read_lines(stderr);

    let status = child.wait().await?;

    let stdout = stdout_reader.join().await?;
    let stderr = stderr_reader.join().await?;

    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}

/// A reader task that is aborted when dropped before completion.
struct StreamReader(JoinHandle<String>);

impl StreamReader {
    async fn join(&mut self) -> std::io::Result<String> {
        (&mut self.0).await.map_err(std::io::Error::other)
    }
}

impl Drop for StreamReader {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn read_lines<R>(stream: R) -> StreamReader
where
    R: AsyncRead + Unpin + Send + 'static,
{
    StreamReader(tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        let mut output = String::new();
        while let Ok(Some(line)) = lines.next_line().await {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }))
}
