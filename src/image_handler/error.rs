//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 压缩链路中编码、缩放、配置校验与落盘的失败都归入 `ImageError`，
//! 调用侧按分支匹配。

/// 图片压缩与持久化统一错误类型。
///
/// 该类型会在流程层被上转为 `AppError`，最终输出给用户。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("编码错误：{0}")]
    Encode(String),

    #[error("缩放错误：{0}")]
    Resize(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),
}

