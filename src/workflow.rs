//! # 流程编排模块
//!
//! ## 设计思路
//!
//! 单次运行的完整链路，严格线性、不回退：
//! 1. 读取剪贴板图片（没有图片则提前结束）
//! 2. 规划压缩方案
//! 3. 落盘
//! 4. Git 暂存 / 提交 / 推送
//! 5. 推导公开网址并写回剪贴板
//!
//! ## 实现思路
//!
//! - 外部协作者（剪贴板、Git、估算器）均以 trait 对象注入，设置以不可变引用传入。
//! - 只有存储目录、编码与落盘错误会以 `Err` 中止流程；其余失败降级为日志 + 标志位 / `None`，
//!   让流程尽量走远，并准确报告停在哪一步。
//! - 记录 `plan/write/publish/total` 阶段耗时。

use chrono::{DateTime, Local};
use image::GenericImageView;
use std::path::PathBuf;
use std::time::Instant;

use crate::clipboard::ClipboardAccess;
use crate::error::AppError;
use crate::image_handler::{self, EncodingChoice, PlanStage, SizeEstimator};
use crate::publisher::{PublishedAsset, Publisher, VersionControl};
use crate::settings::AppSettings;
use crate::storage::{ensure_images_dir, generate_file_name};

/// 图片已保存后的运行摘要。
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub byte_size: u64,
    pub choice: EncodingChoice,
    pub stage: PlanStage,
    /// Git 暂存 / 提交 / 推送是否成功（无变更可提交也算成功）。
    pub published: bool,
    pub asset: Option<PublishedAsset>,
    pub public_url: Option<String>,
    pub url_copied: bool,
}

/// 单次运行结果。
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// 剪贴板中没有图片。
    NoImage,
    /// 图片已保存（发布结果见摘要）。
    Saved(RunSummary),
}

impl RunOutcome {
    /// 图片已保存且已发布。
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved(summary) if summary.published)
    }
}

/// 执行一次完整流程。
pub fn run(
    settings: &AppSettings,
    clipboard: &mut dyn ClipboardAccess,
    vcs: &dyn VersionControl,
    estimator: &dyn SizeEstimator,
    now: DateTime<Local>,
) -> Result<RunOutcome, AppError> {
    let total_start = Instant::now();

    log::info!("目标目录：{}", settings.images_dir.display());
    log::info!("Git 操作目录：{}", vcs.work_dir().display());
    log::info!("最大文件大小限制：{} KB", settings.max_size_kb);

    let images_dir = ensure_images_dir(&settings.images_dir)?;

    let image = match clipboard.read_image() {
        Ok(Some(image)) => image,
        Ok(None) => {
            log::warn!("📭 剪贴板中没有图片");
            return Ok(RunOutcome::NoImage);
        }
        Err(err) => {
            log::error!("❌ 获取剪贴板图片时发生错误：{}", err);
            return Ok(RunOutcome::NoImage);
        }
    };

    let (width, height) = image.dimensions();
    log::info!("🖼️ 获取到图片，尺寸：{}x{}，模式：{:?}", width, height, image.color());

    let plan_start = Instant::now();
    let plan = image_handler::plan(image, settings.max_size_kb, &settings.compression, estimator)?;
    let plan_elapsed = plan_start.elapsed();

    let file_name = generate_file_name(&now, plan.choice.format.extension());
    let path = images_dir.join(&file_name);
    log::info!("生成文件名称：{}", file_name);

    let write_start = Instant::now();
    let byte_size = image_handler::write_image(
        &plan.image,
        &plan.choice,
        &path,
        settings.compression.background,
    )?;
    let write_elapsed = write_start.elapsed();

    let publish_start = Instant::now();
    let publisher = Publisher::new(vcs, &settings.github, &settings.raw_host);
    let published = publisher.publish(&file_name);

    let mut asset = None;
    let mut public_url = None;
    let mut url_copied = false;

    if published {
        match PublishedAsset::new(&path, byte_size, vcs.work_dir()) {
            Ok(created) => {
                let url = publisher.public_url(&created);
                url_copied = match clipboard.write_text(&url) {
                    Ok(()) => {
                        log::info!("📋 已复制到剪贴板：{}", url);
                        true
                    }
                    Err(err) => {
                        log::error!("❌ 复制到剪贴板失败：{}", err);
                        false
                    }
                };
                asset = Some(created);
                public_url = Some(url);
            }
            Err(err) => log::error!("❌ 无法计算文件相对路径：{}", err),
        }
    }
    let publish_elapsed = publish_start.elapsed();

    log::info!(
        "⏱️ 阶段耗时 - plan: {}ms write: {}ms publish: {}ms total: {}ms",
        plan_elapsed.as_millis(),
        write_elapsed.as_millis(),
        publish_elapsed.as_millis(),
        total_start.elapsed().as_millis()
    );

    Ok(RunOutcome::Saved(RunSummary {
        path,
        byte_size,
        choice: plan.choice,
        stage: plan.stage,
        published,
        asset,
        public_url,
        url_copied,
    }))
}
