//! # Git 能力模块
//!
//! ## 设计思路
//!
//! 发布流程只依赖 `VersionControl` trait 暴露的最小能力集合：
//! 仓库检查、暂存、已暂存变更检查、提交、推送、读取远端地址与当前分支。
//! 真实实现 `GitCli` 通过子进程调用 `git`；测试可注入假实现，无需真实仓库。
//!
//! ## 实现思路
//!
//! - 所有命令都以工作副本为当前目录同步执行，不设超时。
//! - 退出码非零时携带 stderr 返回 `GitError::CommandFailed`。
//! - 无法启动进程（未安装 git 等）返回 `GitError::Spawn`。

use std::path::{Path, PathBuf};
use std::process::Command;

/// Git 操作错误。
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("无法执行 git 命令 `{command}`：{source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git 命令 `{command}` 失败（{status}）：{stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{0} 不是 Git 仓库")]
    NotRepository(PathBuf),
}

/// 版本控制能力。
pub trait VersionControl {
    /// 工作副本根目录。
    fn work_dir(&self) -> &Path;

    fn is_repository(&self) -> bool;

    /// 暂存所有变更（`git add .`）。
    fn stage_all(&self) -> Result<(), GitError>;

    /// 是否存在已暂存的变更。
    fn has_staged_changes(&self) -> Result<bool, GitError>;

    fn commit(&self, message: &str) -> Result<(), GitError>;

    fn push(&self) -> Result<(), GitError>;

    /// `origin` 的远端地址。
    fn remote_url(&self) -> Result<String, GitError>;

    /// 当前分支名；分离 HEAD 时为空字符串。
    fn current_branch(&self) -> Result<String, GitError>;
}

/// 基于 `git` 命令行的实现。
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
        }
    }

    /// 执行一条 git 子命令并返回去除首尾空白的 stdout。
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = format!("{} {}", self.program, args.join(" "));
        log::debug!("▶️ 执行：{}（目录：{}）", command, self.work_dir.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::debug!("{}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for GitCli {
    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn is_repository(&self) -> bool {
        self.work_dir.is_dir() && self.run(&["rev-parse", "--git-dir"]).is_ok()
    }

    fn stage_all(&self) -> Result<(), GitError> {
        self.run(&["add", "."]).map(|_| ())
    }

    fn has_staged_changes(&self) -> Result<bool, GitError> {
        let staged = self.run(&["diff", "--cached", "--name-only"])?;
        Ok(!staged.is_empty())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    fn push(&self) -> Result<(), GitError> {
        self.run(&["push"]).map(|_| ())
    }

    fn remote_url(&self) -> Result<String, GitError> {
        self.run(&["remote", "get-url", "origin"])
    }

    fn current_branch(&self) -> Result<String, GitError> {
        self.run(&["branch", "--show-current"])
    }
}
