//! # 编码方案模型
//!
//! ## 设计思路
//!
//! 将“候选编码方案”建模为普通值：格式 + 质量 + 目标尺寸。
//! 规划器只生成与比较 `EncodingChoice`，真正的编码由 `encoder` 负责。

use std::fmt;

/// 输出格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 无损（PNG，保留透明通道）。
    Png,
    /// 有损（JPEG，透明通道需先合成到底色）。
    Jpeg,
}

impl OutputFormat {
    /// 落盘使用的文件扩展名。
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => f.write_str("PNG"),
            Self::Jpeg => f.write_str("JPEG"),
        }
    }
}

/// 一次候选编码方案。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingChoice {
    pub format: OutputFormat,
    /// JPEG 质量（1~100）；无损格式为 `None`。
    pub quality: Option<u8>,
    /// 目标宽度（像素）。
    pub width: u32,
    /// 目标高度（像素）。
    pub height: u32,
}

impl EncodingChoice {
    pub fn lossless(width: u32, height: u32) -> Self {
        Self {
            format: OutputFormat::Png,
            quality: None,
            width,
            height,
        }
    }

    pub fn lossy(quality: u8, width: u32, height: u32) -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: Some(quality.clamp(1, 100)),
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Display for EncodingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quality {
            Some(q) => write!(f, "{} q{} {}x{}", self.format, q, self.width, self.height),
            None => write!(f, "{} {}x{}", self.format, self.width, self.height),
        }
    }
}
