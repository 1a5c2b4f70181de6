//! 剪贴板读写模块
//!
//! # 设计思路
//!
//! 流程只需要两种剪贴板能力：读取一张位图、写入一段文本。
//! 两者通过 `ClipboardAccess` trait 暴露，流程测试可以注入假剪贴板。
//!
//! # 实现思路
//!
//! - `SystemClipboard` 基于 `arboard`，每次操作独立打开剪贴板。
//! - `arboard` 返回的 RGBA 原始缓冲转换为 `image::DynamicImage`，长度不符视为剪贴板错误。
//! - 剪贴板中没有图片（`ContentNotAvailable`）返回 `Ok(None)`，不是错误。
//! - Linux 下剪贴板内容归属于写入进程；`hold` 开启时阻塞直到其他程序接管，避免进程退出后网址丢失。

use image::{DynamicImage, RgbaImage};

use crate::error::AppError;

/// 剪贴板能力。
pub trait ClipboardAccess {
    /// 读取剪贴板中的位图；没有图片时返回 `Ok(None)`。
    fn read_image(&mut self) -> Result<Option<DynamicImage>, AppError>;

    /// 用文本覆盖剪贴板内容。
    fn write_text(&mut self, text: &str) -> Result<(), AppError>;
}

/// 系统剪贴板。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard {
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold: bool,
}

impl SystemClipboard {
    pub fn new(hold: bool) -> Self {
        Self { hold }
    }

    fn open() -> Result<arboard::Clipboard, AppError> {
        arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

impl ClipboardAccess for SystemClipboard {
    fn read_image(&mut self) -> Result<Option<DynamicImage>, AppError> {
        let mut clipboard = Self::open()?;

        match clipboard.get_image() {
            Ok(image_data) => image_from_clipboard(image_data).map(Some),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(AppError::Clipboard(format!("读取剪贴板图片失败: {}", e))),
        }
    }

    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        use arboard::SetExtLinux;

        let mut clipboard = Self::open()?;
        let result = if self.hold {
            log::info!("📌 保持剪贴板所有权，直到其他程序接管...");
            clipboard.set().wait().text(text.to_owned())
        } else {
            clipboard.set_text(text.to_owned())
        };
        result.map_err(|e| AppError::Clipboard(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        let mut clipboard = Self::open()?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

/// 将剪贴板 RGBA 缓冲转换为图片。
pub fn image_from_clipboard(image_data: arboard::ImageData<'_>) -> Result<DynamicImage, AppError> {
    let width = u32::try_from(image_data.width)
        .map_err(|_| AppError::Clipboard(format!("图片宽度过大：{}", image_data.width)))?;
    let height = u32::try_from(image_data.height)
        .map_err(|_| AppError::Clipboard(format!("图片高度过大：{}", image_data.height)))?;

    let image = RgbaImage::from_raw(width, height, image_data.bytes.into_owned())
        .ok_or_else(|| AppError::Clipboard("创建图像缓冲区失败".to_string()))?;

    Ok(DynamicImage::ImageRgba8(image))
}
