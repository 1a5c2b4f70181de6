//! # 落盘模块
//!
//! 使用与估算相同的编码路径写入文件，并回读文件大小用于校验与日志。

use image::DynamicImage;
use std::fs;
use std::path::Path;

use super::encoder::encode_to_vec;
use super::estimator::bytes_to_kb;
use super::{EncodingChoice, ImageError};

/// 按编码方案写入图片，返回磁盘上的文件大小（字节）。
///
/// # 返回
/// - `Ok(u64)`：写入成功后的文件大小
/// - `Err(ImageError::Encode)`：编码失败
/// - `Err(ImageError::FileSystem)`：目标路径不可写
pub fn write_image(
    image: &DynamicImage,
    choice: &EncodingChoice,
    destination: &Path,
    background: [u8; 3],
) -> Result<u64, ImageError> {
    let bytes = encode_to_vec(image, choice, background)?;

    fs::write(destination, &bytes).map_err(|e| {
        ImageError::FileSystem(format!("写入图片失败 '{}'：{}", destination.display(), e))
    })?;

    let size = fs::metadata(destination)
        .map_err(|e| ImageError::FileSystem(format!("读取文件信息失败：{}", e)))?
        .len();

    log::info!("💾 图片已保存：{}", destination.display());
    log::info!("最终文件大小：{:.1} KB", bytes_to_kb(size));

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn written_size_matches_reported_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.png");
        let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(12, 9, Rgba([9, 8, 7, 255])));

        let size = write_image(&img, &EncodingChoice::lossless(12, 9), &path, [255, 255, 255])
            .expect("write should succeed");

        assert_eq!(size, fs::metadata(&path).expect("metadata").len());
        assert!(size > 0);
    }

    #[test]
    fn unwritable_destination_is_a_filesystem_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.jpg");
        let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(4, 4, Rgba([0, 0, 0, 255])));

        let result = write_image(&img, &EncodingChoice::lossy(75, 4, 4), &path, [255, 255, 255]);

        assert!(matches!(result, Err(ImageError::FileSystem(_))));
    }
}
