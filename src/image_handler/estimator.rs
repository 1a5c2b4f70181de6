//! # 体积估算模块
//!
//! 在内存中编码一次并测量字节数，不触碰磁盘。
//! 规划器通过 `SizeEstimator` trait 依赖估算能力，测试可注入按尺寸建模的假实现。

use image::DynamicImage;

use super::encoder::encode_to_vec;
use super::{EncodingChoice, ImageError};

/// 体积估算能力。
pub trait SizeEstimator {
    /// 估算图片按 `choice` 编码后的大小（KB，1 KB = 1024 字节）。
    fn estimate_kb(&self, image: &DynamicImage, choice: &EncodingChoice) -> Result<f64, ImageError>;
}

/// 基于真实编码器的估算实现。
#[derive(Debug, Clone, Copy)]
pub struct EncodedSizeEstimator {
    background: [u8; 3],
}

impl EncodedSizeEstimator {
    pub fn new(background: [u8; 3]) -> Self {
        Self { background }
    }
}

impl Default for EncodedSizeEstimator {
    fn default() -> Self {
        Self::new([255, 255, 255])
    }
}

impl SizeEstimator for EncodedSizeEstimator {
    fn estimate_kb(&self, image: &DynamicImage, choice: &EncodingChoice) -> Result<f64, ImageError> {
        let bytes = encode_to_vec(image, choice, self.background)?;
        Ok(bytes_to_kb(bytes.len() as u64))
    }
}

pub(crate) fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}
