//! # 压缩配置模块
//!
//! ## 设计思路
//!
//! 压缩搜索的阈值、质量序列与缩放序列都集中在 `CompressionConfig`。
//! 默认值即生产行为：先整体缩到 1920px 以内，再按固定序列降低 JPEG 质量，最后逐级缩小尺寸。
//!
//! ## 实现思路
//!
//! - `Default` 提供完整的默认搜索序列。
//! - 缩放比例以百分比整数保存，尺寸计算全程为整数运算。
//! - `validate` 在流程开始前拒绝空序列与越界参数，规划阶段无需再做防御判断。

use fast_image_resize as fr;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::ImageError;

/// 预缩放阈值：任一边超过该值时整体缩放到最长边等于该值。
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
/// JPEG 质量扫描序列（严格递减）。
pub const DEFAULT_QUALITY_LEVELS: [u8; 7] = [95, 85, 75, 65, 55, 45, 35];
/// 尺寸扫描序列（百分比，严格递减）。
pub const DEFAULT_SCALE_PERCENTS: [u32; 5] = [90, 80, 70, 60, 50];
/// 尺寸扫描阶段使用的固定质量。
pub const DEFAULT_SCALE_QUALITY: u8 = 75;

/// 缩放滤镜（可序列化，映射到 `image` 与 `fast_image_resize` 的滤镜）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub(crate) fn to_image_filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }

    pub(crate) fn to_fast_algorithm(self) -> fr::ResizeAlg {
        match self {
            Self::Nearest => fr::ResizeAlg::Nearest,
            Self::Triangle => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            Self::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            Self::Gaussian => fr::ResizeAlg::Convolution(fr::FilterType::Gaussian),
            Self::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }
}

/// 压缩搜索配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// 预缩放阈值（像素）。
    pub max_dimension: u32,
    /// JPEG 质量扫描序列，按顺序尝试。
    pub quality_levels: Vec<u8>,
    /// 尺寸扫描比例（百分比），均相对预缩放后的图片计算。
    pub scale_percents: Vec<u32>,
    /// 尺寸扫描阶段的 JPEG 质量。
    pub scale_quality: u8,
    /// 缩放滤镜。
    pub resize_filter: ResizeFilter,
    /// JPEG 不支持透明通道，合成时使用的底色。
    pub background: [u8; 3],
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality_levels: DEFAULT_QUALITY_LEVELS.to_vec(),
            scale_percents: DEFAULT_SCALE_PERCENTS.to_vec(),
            scale_quality: DEFAULT_SCALE_QUALITY,
            resize_filter: ResizeFilter::Lanczos3,
            background: [255, 255, 255],
        }
    }
}

impl CompressionConfig {
    /// 校验配置是否可用于规划。
    ///
    /// # 返回
    /// - `Ok(())`：配置合法
    /// - `Err(ImageError::InvalidFormat)`：序列为空、未严格递减或参数越界
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.max_dimension == 0 {
            return Err(ImageError::InvalidFormat("max_dimension 必须大于 0".to_string()));
        }
        if self.quality_levels.is_empty() {
            return Err(ImageError::InvalidFormat("quality_levels 不能为空".to_string()));
        }
        if let Some(q) = self.quality_levels.iter().find(|q| **q == 0 || **q > 100) {
            return Err(ImageError::InvalidFormat(format!(
                "JPEG 质量必须在 1~100 之间：{}",
                q
            )));
        }
        if !is_strictly_descending(&self.quality_levels) {
            return Err(ImageError::InvalidFormat(format!(
                "quality_levels 必须严格递减：{:?}",
                self.quality_levels
            )));
        }
        if self.scale_percents.is_empty() {
            return Err(ImageError::InvalidFormat("scale_percents 不能为空".to_string()));
        }
        if let Some(p) = self.scale_percents.iter().find(|p| **p == 0 || **p > 100) {
            return Err(ImageError::InvalidFormat(format!(
                "缩放比例必须在 1~100 之间：{}",
                p
            )));
        }
        if !is_strictly_descending(&self.scale_percents) {
            return Err(ImageError::InvalidFormat(format!(
                "scale_percents 必须严格递减：{:?}",
                self.scale_percents
            )));
        }
        if !(1..=100).contains(&self.scale_quality) {
            return Err(ImageError::InvalidFormat(format!(
                "scale_quality 必须在 1~100 之间：{}",
                self.scale_quality
            )));
        }
        Ok(())
    }
}

fn is_strictly_descending<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] > pair[1])
}
