//! # 发布模块
//!
//! ## 设计思路
//!
//! 发布与持久化解耦：图片在进入本模块前已经落盘，这里的任何失败都不会回滚或删除文件。
//!
//! - `publish`：暂存 → （有变更才）提交 → 推送，结果降级为布尔标志
//! - `public_url`：由远端地址 + 当前分支 + 仓库内相对路径拼出公开网址
//!
//! ## 实现思路
//!
//! - 所有 Git 交互经由 `VersionControl` trait，发布逻辑可用假实现测试。
//! - 远端解析失败时回退到配置中的默认用户名 / 仓库名；分支为空（分离 HEAD）或读取失败时回退到默认分支。
//! - 相对路径统一使用 `/` 分隔，保证 Windows 下生成的网址同样可用。

pub mod git;
pub mod remote;

use std::path::{Component, Path, PathBuf};

pub use git::{GitCli, GitError, VersionControl};
pub use remote::{parse_remote_url, RemoteRepo};

use crate::error::AppError;
use crate::settings::GitHubDefaults;

/// 已发布资源：文件路径、大小与仓库内相对路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAsset {
    pub path: PathBuf,
    pub byte_size: u64,
    /// 相对仓库根目录的路径（`/` 分隔）。
    pub relative_path: String,
}

impl PublishedAsset {
    /// 以仓库根目录为基准创建资源。
    ///
    /// 文件不在仓库目录内时返回 `AppError::PublicUrl`。
    pub fn new(path: &Path, byte_size: u64, repo_root: &Path) -> Result<Self, AppError> {
        let relative_path = relative_repo_path(repo_root, path)?;
        Ok(Self {
            path: path.to_path_buf(),
            byte_size,
            relative_path,
        })
    }
}

/// 单次发布的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// 已提交并推送。
    Pushed,
    /// 没有已暂存的变更，跳过提交与推送。
    NothingToCommit,
}

/// 发布器：编排 Git 操作并推导公开网址。
pub struct Publisher<'a> {
    vcs: &'a dyn VersionControl,
    defaults: &'a GitHubDefaults,
    raw_host: &'a str,
}

impl<'a> Publisher<'a> {
    pub fn new(vcs: &'a dyn VersionControl, defaults: &'a GitHubDefaults, raw_host: &'a str) -> Self {
        Self {
            vcs,
            defaults,
            raw_host,
        }
    }

    /// 暂存、提交并推送新文件。
    ///
    /// 任何失败都只记录日志并返回 `false`；没有变更可提交视为成功。
    pub fn publish(&self, file_name: &str) -> bool {
        match self.try_publish(file_name) {
            Ok(PublishOutcome::Pushed) => true,
            Ok(PublishOutcome::NothingToCommit) => {
                log::info!("没有变更需要提交");
                true
            }
            Err(err) => {
                log::error!("❌ Git 操作失败：{}", err);
                false
            }
        }
    }

    /// 与 `publish` 相同，但返回结构化结果。
    pub fn try_publish(&self, file_name: &str) -> Result<PublishOutcome, GitError> {
        let work_dir = self.vcs.work_dir();
        if !self.vcs.is_repository() {
            return Err(GitError::NotRepository(work_dir.to_path_buf()));
        }
        log::info!("切换到 Git 目录：{}", work_dir.display());

        self.vcs.stage_all()?;
        log::info!("Git add 完成");

        if !self.vcs.has_staged_changes()? {
            return Ok(PublishOutcome::NothingToCommit);
        }

        let message = commit_message(file_name);
        self.vcs.commit(&message)?;
        log::info!("Git commit 完成：{}", message);

        self.vcs.push()?;
        log::info!("Git push 完成");

        Ok(PublishOutcome::Pushed)
    }

    /// 解析仓库归属（owner, repo），解析失败时回退到默认配置。
    pub fn repository_identity(&self) -> (String, String) {
        let parsed = match self.vcs.remote_url() {
            Ok(url) => parse_remote_url(&url),
            Err(err) => {
                log::debug!("读取远端地址失败：{}", err);
                None
            }
        };

        match parsed {
            Some(remote) => (remote.owner, remote.repo),
            None => {
                log::warn!("⚠️ 无法自动获取 GitHub 信息，使用默认设置");
                (self.defaults.user.clone(), self.defaults.repo.clone())
            }
        }
    }

    /// 当前分支，读取失败或为空时回退到默认分支。
    pub fn branch(&self) -> String {
        match self.vcs.current_branch() {
            Ok(branch) if !branch.is_empty() => branch,
            Ok(_) => {
                log::warn!("⚠️ 当前处于分离 HEAD，使用默认分支 {}", self.defaults.branch);
                self.defaults.branch.clone()
            }
            Err(err) => {
                log::warn!("⚠️ 读取当前分支失败，使用默认分支 {}：{}", self.defaults.branch, err);
                self.defaults.branch.clone()
            }
        }
    }

    /// 生成资源的公开网址：`https://<raw_host>/<owner>/<repo>/<branch>/<relative_path>`。
    pub fn public_url(&self, asset: &PublishedAsset) -> String {
        let (owner, repo) = self.repository_identity();
        let branch = self.branch();
        format!(
            "https://{}/{}/{}/{}/{}",
            self.raw_host, owner, repo, branch, asset.relative_path
        )
    }
}

/// 提交信息。
pub fn commit_message(file_name: &str) -> String {
    format!("Add clipboard image: {}", file_name)
}

/// 计算文件相对仓库根目录的路径，使用 `/` 分隔。
///
/// 先按字面路径比较，失败后再对两者做 canonicalize（处理符号链接与 `..`）。
pub fn relative_repo_path(repo_root: &Path, file: &Path) -> Result<String, AppError> {
    let literal = file
        .strip_prefix(repo_root)
        .ok()
        .filter(|relative| relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)))
        .map(Path::to_path_buf);

    let relative = match literal {
        Some(relative) => relative,
        None => {
            let root = repo_root.canonicalize()?;
            let file = file.canonicalize()?;
            file.strip_prefix(&root)
                .map(Path::to_path_buf)
                .map_err(|_| {
                    AppError::PublicUrl(format!(
                        "文件 {} 不在仓库目录 {} 内",
                        file.display(),
                        root.display()
                    ))
                })?
        }
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            other => {
                return Err(AppError::PublicUrl(format!(
                    "相对路径包含不支持的片段：{:?}",
                    other
                )));
            }
        }
    }

    if parts.is_empty() {
        return Err(AppError::PublicUrl("相对路径为空".to_string()));
    }

    Ok(parts.join("/"))
}
