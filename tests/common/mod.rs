//! 集成测试共用的假剪贴板与假版本控制实现。

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use clipboard_publisher::clipboard::ClipboardAccess;
use clipboard_publisher::error::AppError;
use clipboard_publisher::publisher::{GitError, VersionControl};
use image::DynamicImage;

/// 记录调用顺序、可按步骤注入失败的版本控制实现。
pub struct FakeVcs {
    pub work_dir: PathBuf,
    pub is_repo: bool,
    pub staged: bool,
    pub fail_on: Option<&'static str>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            is_repo: true,
            staged: true,
            fail_on: None,
            remote: Some("https://github.com/octocat/pics.git".to_string()),
            branch: Some("main".to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn step(&self, name: &'static str) -> Result<(), GitError> {
        self.calls.borrow_mut().push(name.to_string());
        if self.fail_on == Some(name) {
            return Err(GitError::CommandFailed {
                command: format!("git {}", name),
                status: "exit status: 1".to_string(),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }

    fn missing(name: &str) -> GitError {
        GitError::CommandFailed {
            command: format!("git {}", name),
            status: "exit status: 2".to_string(),
            stderr: String::new(),
        }
    }
}

impl VersionControl for FakeVcs {
    fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn is_repository(&self) -> bool {
        self.is_repo
    }

    fn stage_all(&self) -> Result<(), GitError> {
        self.step("add")
    }

    fn has_staged_changes(&self) -> Result<bool, GitError> {
        self.step("status")?;
        Ok(self.staged)
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.step("commit")?;
        self.calls.borrow_mut().push(format!("message:{}", message));
        Ok(())
    }

    fn push(&self) -> Result<(), GitError> {
        self.step("push")
    }

    fn remote_url(&self) -> Result<String, GitError> {
        self.remote.clone().ok_or_else(|| Self::missing("remote"))
    }

    fn current_branch(&self) -> Result<String, GitError> {
        self.branch.clone().ok_or_else(|| Self::missing("branch"))
    }
}

/// 内存剪贴板。
#[derive(Default)]
pub struct FakeClipboard {
    pub image: Option<DynamicImage>,
    pub fail_read: bool,
    pub fail_write: bool,
    pub written: Vec<String>,
}

impl FakeClipboard {
    pub fn with_image(image: DynamicImage) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }
}

impl ClipboardAccess for FakeClipboard {
    fn read_image(&mut self) -> Result<Option<DynamicImage>, AppError> {
        if self.fail_read {
            return Err(AppError::Clipboard("clipboard unavailable".to_string()));
        }
        Ok(self.image.take())
    }

    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        if self.fail_write {
            return Err(AppError::Clipboard("clipboard unavailable".to_string()));
        }
        self.written.push(text.to_string());
        Ok(())
    }
}

/// 确定性伪随机噪声图，PNG 几乎无法压缩。
pub fn noise_rgba(width: u32, height: u32) -> DynamicImage {
    let mut state: u32 = 0x1234_5678;
    let image = image::RgbaImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        image::Rgba([next(), next(), next(), next()])
    });
    DynamicImage::ImageRgba8(image)
}

/// 纯色图片。
pub fn solid_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(image::RgbImage::from_pixel(width, height, image::Rgb([40, 120, 200])))
}
