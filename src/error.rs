//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，各模块的错误在此汇合。
//!
//! 流程层（`workflow`）与入口（`main`）统一处理 `Result<T, AppError>`。
//! 只有配置错误与编码/落盘错误会中止流程；剪贴板与 Git 失败在流程内降级为日志 + 标志位。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError`、`GitError`、`std::io::Error` 提供 `From` 转换。

use crate::image_handler::ImageError;
use crate::publisher::GitError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 剪贴板读写操作失败
    #[error("剪贴板操作失败: {0}")]
    Clipboard(String),

    /// 图片压缩流水线错误（编码 / 缩放 / 落盘）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 存储目录不可用
    #[error("存储目录不可用: {0}")]
    Storage(String),

    /// 配置文件缺失字段、格式错误或取值越界
    #[error("配置错误: {0}")]
    Config(String),

    /// Git 命令执行失败
    #[error("{0}")]
    Git(#[from] GitError),

    /// 公开网址推导失败
    #[error("无法生成公开网址: {0}")]
    PublicUrl(String),
}
