//! 应用设置模块
//!
//! # 设计思路
//!
//! 所有路径、体积预算与 GitHub 默认标识集中到不可变的 `AppSettings`，
//! 在入口处构建一次后以引用传入各阶段，阶段之间不共享可变状态。
//!
//! # 实现思路
//!
//! - 设置文件为 JSON，所有字段都有默认值（`#[serde(default)]`），可以只写需要覆盖的字段。
//! - 未显式指定设置文件时读取 `<配置目录>/clipboard-publisher/settings.json`，不存在则使用默认值。
//! - 命令行覆盖通过 `with_overrides` 生成新值，而不是原地修改。

use std::fs;
use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::image_handler::CompressionConfig;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// 远端解析失败时使用的 GitHub 标识。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubDefaults {
    pub user: String,
    pub repo: String,
    pub branch: String,
}

impl Default for GitHubDefaults {
    fn default() -> Self {
        Self {
            user: "your-username".to_string(),
            repo: "public_images".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// 应用设置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 图片保存目录（必须位于 `repo_dir` 内）。
    pub images_dir: PathBuf,
    /// Git 工作副本根目录。
    pub repo_dir: PathBuf,
    /// 体积预算（KB）。
    pub max_size_kb: f64,
    pub github: GitHubDefaults,
    /// 公开网址使用的主机名。
    pub raw_host: String,
    /// git 可执行文件。
    pub git_program: String,
    /// Linux 下写入剪贴板后保持所有权，直到其他程序接管。
    pub hold_clipboard: bool,
    pub compression: CompressionConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        let repo_dir = home_dir().join("public_images");
        Self {
            images_dir: repo_dir.join("images"),
            repo_dir,
            max_size_kb: 500.0,
            github: GitHubDefaults::default(),
            raw_host: "raw.githubusercontent.com".to_string(),
            git_program: "git".to_string(),
            hold_clipboard: false,
            compression: CompressionConfig::default(),
        }
    }
}

/// 命令行覆盖项。
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub max_size_kb: Option<f64>,
    pub images_dir: Option<PathBuf>,
    pub repo_dir: Option<PathBuf>,
}

fn home_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// 默认设置文件路径。
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "clipboard-publisher")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
}

impl AppSettings {
    /// 从 JSON 文本解析设置。
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        serde_json::from_str(content)
            .map_err(|e| AppError::Config(format!("解析设置文件失败: {}", e)))
    }

    /// 加载设置。
    ///
    /// - 显式路径：文件必须存在且可解析
    /// - 未指定：默认路径存在则读取，否则使用默认值
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("读取设置文件 '{}' 失败: {}", path.display(), e))
            })?;
            log::info!("⚙️ 使用设置文件：{}", path.display());
            return Self::from_json(&content);
        }

        match default_settings_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                log::info!("⚙️ 使用设置文件：{}", path.display());
                Self::from_json(&content)
            }
            _ => {
                log::debug!("未找到设置文件，使用默认设置");
                Ok(Self::default())
            }
        }
    }

    /// 应用命令行覆盖，返回新的设置值。
    pub fn with_overrides(self, overrides: SettingsOverrides) -> Self {
        Self {
            max_size_kb: overrides.max_size_kb.unwrap_or(self.max_size_kb),
            images_dir: overrides.images_dir.unwrap_or(self.images_dir),
            repo_dir: overrides.repo_dir.unwrap_or(self.repo_dir),
            ..self
        }
    }

    /// 校验设置。
    ///
    /// 图片目录不在仓库目录内只记录警告：图片仍会保存，只是无法生成公开网址。
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.max_size_kb.is_finite() {
            return Err(AppError::Config(format!(
                "max_size_kb 必须是有限数值: {}",
                self.max_size_kb
            )));
        }
        if self.raw_host.trim().is_empty() {
            return Err(AppError::Config("raw_host 不能为空".to_string()));
        }
        if self.git_program.trim().is_empty() {
            return Err(AppError::Config("git_program 不能为空".to_string()));
        }
        self.compression
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if !self.images_dir.starts_with(&self.repo_dir) {
            log::warn!(
                "⚠️ 图片目录 {} 不在 Git 目录 {} 内，将无法生成公开网址",
                self.images_dir.display(),
                self.repo_dir.display()
            );
        }

        Ok(())
    }
}
