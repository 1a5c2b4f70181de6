//! # 尺寸变换流水线模块
//!
//! ## 设计思路
//!
//! 规划器需要两类尺寸变换：一次性的预缩放（最长边压到阈值）与逐级比例缩小。
//! 尺寸计算与像素变换分离：尺寸计算是纯整数运算，可单独做性质测试；
//! 像素变换只负责把图片缩放到给定尺寸。
//!
//! ## 实现思路
//!
//! 1. 尺寸全部用整数运算并向下取整，最小为 1 像素
//! 2. 优先使用 `fast_image_resize`（SIMD 卷积）
//! 3. 失败时回退到 `image::DynamicImage::resize_exact`
//! 4. 保持颜色模式：不透明图片按 RGB 缩放，带透明通道的按 RGBA 缩放

use fast_image_resize as fr;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb, Rgba};

use super::config::ResizeFilter;
use super::ImageError;

/// 计算预缩放后的尺寸。
///
/// 两边均不超过 `max_dimension` 时返回 `None`（无需缩放）；
/// 否则最长边等于 `max_dimension`，短边按比例向下取整。
pub fn downscaled_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if width <= max_dimension && height <= max_dimension {
        return None;
    }

    let max = max_dimension as u64;
    let (w, h) = (width as u64, height as u64);
    if w >= h {
        Some((max_dimension, ((h * max) / w).max(1) as u32))
    } else {
        Some((((w * max) / h).max(1) as u32, max_dimension))
    }
}

/// 按百分比计算缩放后的尺寸（向下取整，最小 1 像素）。
pub fn scaled_dimensions(width: u32, height: u32, percent: u32) -> (u32, u32) {
    let scale = |side: u32| ((side as u64 * percent as u64) / 100).max(1) as u32;
    (scale(width), scale(height))
}

/// 预缩放：任一边超过阈值时整体缩小，否则原样返回。
pub fn pre_downscale(
    image: DynamicImage,
    max_dimension: u32,
    filter: ResizeFilter,
) -> Result<DynamicImage, ImageError> {
    let (width, height) = image.dimensions();
    let Some((target_width, target_height)) = downscaled_dimensions(width, height, max_dimension)
    else {
        return Ok(image);
    };

    log::info!(
        "📐 调整尺寸：{}x{} -> {}x{}",
        width,
        height,
        target_width,
        target_height
    );
    resize_exact(&image, target_width, target_height, filter)
}

/// 缩放到精确尺寸。
pub fn resize_exact(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: ResizeFilter,
) -> Result<DynamicImage, ImageError> {
    if image.dimensions() == (target_width, target_height) {
        return Ok(image.clone());
    }

    match resize_with_fast_image_resize(image, target_width, target_height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                err
            );
            Ok(image.resize_exact(target_width, target_height, filter.to_image_filter()))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: ResizeFilter,
) -> Result<DynamicImage, ImageError> {
    let has_alpha = image.color().has_alpha();
    let (src_width, src_height) = image.dimensions();
    let (pixel_type, src_bytes) = if has_alpha {
        (fr::PixelType::U8x4, image.to_rgba8().into_raw())
    } else {
        (fr::PixelType::U8x3, image.to_rgb8().into_raw())
    };

    let src_image = fr::images::Image::from_vec_u8(src_width, src_height, src_bytes, pixel_type)
        .map_err(|e| ImageError::Resize(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, pixel_type);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(filter.to_fast_algorithm());

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ImageError::Resize(format!("fast_image_resize 执行失败：{}", e)))?;

    let bytes = dst_image.into_vec();
    let resized = if has_alpha {
        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, bytes)
            .map(DynamicImage::ImageRgba8)
    } else {
        ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(target_width, target_height, bytes)
            .map(DynamicImage::ImageRgb8)
    };

    resized.ok_or_else(|| ImageError::Resize("fast_image_resize 输出缓冲长度异常".to_string()))
}
