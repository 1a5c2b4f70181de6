//! # 内存编码模块
//!
//! ## 设计思路
//!
//! 估算与落盘共用同一个编码函数，保证“估算大小 == 最终文件大小”。
//!
//! ## 实现思路
//!
//! - PNG 使用最高压缩级别 + 自适应滤波。
//! - JPEG 前先把带透明通道的图片合成到不透明底色上，再按 RGB8 编码。
//!   合成必须发生在测量之前，否则估算值与真实输出不一致。

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, Rgb, RgbImage};
use std::io::Cursor;

use super::{EncodingChoice, ImageError, OutputFormat};

/// 按编码方案将图片编码为字节。
///
/// 图片需已处于目标尺寸；此函数不做缩放。
pub fn encode_to_vec(
    image: &DynamicImage,
    choice: &EncodingChoice,
    background: [u8; 3],
) -> Result<Vec<u8>, ImageError> {
    let mut cursor = Cursor::new(Vec::new());

    match choice.format {
        OutputFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut cursor,
                CompressionType::Best,
                PngFilterType::Adaptive,
            );
            image
                .write_with_encoder(encoder)
                .map_err(|e| ImageError::Encode(format!("PNG 编码失败：{}", e)))?;
        }
        OutputFormat::Jpeg => {
            let quality = choice.quality.unwrap_or(75);
            let flattened = DynamicImage::ImageRgb8(flatten_onto_background(image, background));
            let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
            flattened
                .write_with_encoder(encoder)
                .map_err(|e| ImageError::Encode(format!("JPEG 编码失败（质量 {}）：{}", quality, e)))?;
        }
    }

    Ok(cursor.into_inner())
}

/// 将图片合成到不透明底色上，输出 RGB8。
///
/// 不含透明通道的图片直接转换，不做逐像素混合。
pub fn flatten_onto_background(image: &DynamicImage, background: [u8; 3]) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([
            blend_channel(r, background[0], a),
            blend_channel(g, background[1], a),
            blend_channel(b, background[2], a),
        ])
    })
}

fn blend_channel(foreground: u8, background: u8, alpha: u8) -> u8 {
    let alpha = alpha as u16;
    let mixed = foreground as u16 * alpha + background as u16 * (255 - alpha);
    ((mixed + 127) / 255) as u8
}
