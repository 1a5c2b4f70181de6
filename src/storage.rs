//! 图片存储目录管理模块
//!
//! # 设计思路
//!
//! 统一管理剪贴板图片的落盘目录与文件命名，并在目录不存在时自动创建。
//!
//! # 实现思路
//!
//! - 目录不存在时自动 `create_dir_all`。
//! - 文件名由本地时间戳生成（秒级），同一秒内重复运行会覆盖。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// 确保图片存储目录存在。
///
/// # 返回
/// - `Ok(PathBuf)`：可用的图片存储目录
/// - `Err(AppError::Storage)`：无法创建目录或路径不是目录
pub fn ensure_images_dir(dir: &Path) -> Result<PathBuf, AppError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Storage(format!("创建图片目录 '{}' 失败: {}", dir.display(), e))
        })?;
        log::info!("📁 已创建图片目录：{}", dir.display());
    } else if !dir.is_dir() {
        return Err(AppError::Storage(format!("'{}' 不是目录", dir.display())));
    }
    Ok(dir.to_path_buf())
}

/// 生成带时间戳的文件名：`clipboard_image_<YYYYMMDD_HHMMSS>.<ext>`。
pub fn generate_file_name(timestamp: &DateTime<Local>, extension: &str) -> String {
    format!(
        "clipboard_image_{}.{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        extension.to_lowercase()
    )
}
