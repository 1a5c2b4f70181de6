//! # 压缩规划模块（核心）
//!
//! ## 设计思路
//!
//! 在固定预算内寻找“尽量保真”的编码方案，回退顺序固定：
//!
//! ```text
//! 1. 原尺寸 PNG：满足预算则原样返回，不做任何重压缩
//! 2. 预缩放（最长边 1920）：一次性步骤，不属于扫描循环
//! 3. JPEG 质量扫描：95 → 85 → … → 35
//! 4. 尺寸扫描（质量 75）：0.9 → 0.8 → … → 0.5
//! 5. 兜底：返回尺寸扫描最后一个候选，即使仍超出预算
//! ```
//!
//! ## 实现思路
//!
//! - 步骤 3、4 的候选由 `lossy_candidates` 生成为有序列表，规划循环只做“依次尝试、首个命中即返回”。
//! - 估算通过 `SizeEstimator` 注入，规划本身无 I/O、无随机性。
//! - 每次尝试都记录到 `PlanAttempt`，供日志与调用方展示。

use image::{DynamicImage, GenericImageView};

use super::estimator::SizeEstimator;
use super::pipeline::{pre_downscale, resize_exact, scaled_dimensions};
use super::{CompressionConfig, EncodingChoice, ImageError};

/// 规划结束时所处的阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    /// 原图无损即满足预算。
    Baseline,
    /// JPEG 质量扫描命中。
    QualitySweep,
    /// 尺寸扫描命中。
    ScaleSweep,
    /// 所有候选均超出预算，使用最大压缩设定。
    Exhausted,
}

/// 单次尝试记录。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanAttempt {
    pub choice: EncodingChoice,
    pub size_kb: f64,
    pub fits: bool,
}

/// 规划结果：最终图片 + 编码方案。
#[derive(Debug, Clone)]
pub struct CompressionPlan {
    pub image: DynamicImage,
    pub choice: EncodingChoice,
    pub stage: PlanStage,
    /// 最终方案的估算大小（KB）。
    pub estimated_kb: f64,
    /// 全部尝试，按执行顺序排列。
    pub attempts: Vec<PlanAttempt>,
}

impl CompressionPlan {
    pub fn within_budget(&self) -> bool {
        self.stage != PlanStage::Exhausted
    }
}

/// 生成有损阶段（质量扫描 + 尺寸扫描）的候选列表。
///
/// `width`/`height` 为预缩放后的尺寸；尺寸扫描的每个比例都相对该尺寸计算，而非累乘。
pub fn lossy_candidates(width: u32, height: u32, config: &CompressionConfig) -> Vec<EncodingChoice> {
    let quality_sweep = config
        .quality_levels
        .iter()
        .map(|&quality| EncodingChoice::lossy(quality, width, height));

    let scale_sweep = config.scale_percents.iter().map(|&percent| {
        let (w, h) = scaled_dimensions(width, height, percent);
        EncodingChoice::lossy(config.scale_quality, w, h)
    });

    quality_sweep.chain(scale_sweep).collect()
}

/// 在预算内规划编码方案。
///
/// 总是返回一个可用方案：预算无法满足时返回尺寸扫描的最后一个候选。
/// `budget_kb <= 0` 不做特殊处理，自然落到兜底分支。
pub fn plan(
    image: DynamicImage,
    budget_kb: f64,
    config: &CompressionConfig,
    estimator: &dyn SizeEstimator,
) -> Result<CompressionPlan, ImageError> {
    config.validate()?;

    let mut attempts = Vec::new();
    let (width, height) = image.dimensions();

    let baseline = EncodingChoice::lossless(width, height);
    let baseline_kb = estimator.estimate_kb(&image, &baseline)?;
    log::info!("📏 原始图片大小：{:.1} KB（{}x{}）", baseline_kb, width, height);
    attempts.push(PlanAttempt {
        choice: baseline,
        size_kb: baseline_kb,
        fits: baseline_kb <= budget_kb,
    });

    if baseline_kb <= budget_kb {
        log::info!("✅ 图片大小符合要求，无需压缩");
        return Ok(CompressionPlan {
            image,
            choice: baseline,
            stage: PlanStage::Baseline,
            estimated_kb: baseline_kb,
            attempts,
        });
    }

    log::info!("🗜️ 图片大小超过 {} KB，开始压缩...", budget_kb);

    let base = pre_downscale(image, config.max_dimension, config.resize_filter)?;
    let (base_width, base_height) = base.dimensions();
    let quality_steps = config.quality_levels.len();

    let mut last: Option<(DynamicImage, EncodingChoice, f64)> = None;

    for (index, choice) in lossy_candidates(base_width, base_height, config)
        .into_iter()
        .enumerate()
    {
        let candidate = resize_exact(&base, choice.width, choice.height, config.resize_filter)?;
        let size_kb = estimator.estimate_kb(&candidate, &choice)?;
        let fits = size_kb <= budget_kb;
        attempts.push(PlanAttempt {
            choice,
            size_kb,
            fits,
        });

        let stage = if index < quality_steps {
            log::info!("JPEG 质量 {}：{:.1} KB", choice.quality.unwrap_or_default(), size_kb);
            PlanStage::QualitySweep
        } else {
            log::info!(
                "缩放 {}x{}：{:.1} KB",
                choice.width,
                choice.height,
                size_kb
            );
            PlanStage::ScaleSweep
        };

        if fits {
            log::info!("✅ 压缩成功！最终大小：{:.1} KB（{}）", size_kb, choice);
            return Ok(CompressionPlan {
                image: candidate,
                choice,
                stage,
                estimated_kb: size_kb,
                attempts,
            });
        }

        last = Some((candidate, choice, size_kb));
    }

    let (image, choice, estimated_kb) =
        last.ok_or_else(|| ImageError::InvalidFormat("有损候选列表为空".to_string()))?;

    log::warn!(
        "⚠️ 使用最大压缩设定：{}，{:.1} KB 仍超出 {} KB 预算",
        choice,
        estimated_kb,
        budget_kb
    );

    Ok(CompressionPlan {
        image,
        choice,
        stage: PlanStage::Exhausted,
        estimated_kb,
        attempts,
    })
}
