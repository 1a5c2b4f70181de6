//! 压缩规划 + 真实编码器的集成测试。

mod common;

use clipboard_publisher::image_handler::{
    self, CompressionConfig, EncodedSizeEstimator, OutputFormat, PlanStage,
};
use image::GenericImageView;

use common::{noise_rgba, solid_rgb};

#[test]
fn small_image_is_kept_lossless_without_resizing() {
    let image = solid_rgb(200, 200);
    let config = CompressionConfig::default();
    let estimator = EncodedSizeEstimator::default();

    let plan = image_handler::plan(image.clone(), 500.0, &config, &estimator)
        .expect("plan should succeed");

    assert_eq!(plan.stage, PlanStage::Baseline);
    assert_eq!(plan.choice.format, OutputFormat::Png);
    assert_eq!(plan.attempts.len(), 1);
    assert_eq!(plan.image.as_bytes(), image.as_bytes());
}

#[test]
fn alpha_image_written_lossy_has_no_alpha_channel() {
    let image = noise_rgba(256, 256);
    let config = CompressionConfig::default();
    let estimator = EncodedSizeEstimator::default();

    // 256x256 RGBA 噪声的 PNG 约 256 KB，预算远小于此
    let plan = image_handler::plan(image, 60.0, &config, &estimator).expect("plan should succeed");
    assert_eq!(plan.choice.format, OutputFormat::Jpeg);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.jpg");
    let size = image_handler::write_image(&plan.image, &plan.choice, &path, config.background)
        .expect("write should succeed");
    assert!(size > 0);

    let decoded = image::open(&path).expect("decode written file");
    assert!(!decoded.color().has_alpha());
    assert_eq!(decoded.dimensions(), plan.choice.dimensions());
}

#[test]
fn zero_budget_falls_back_to_smallest_scale() {
    let image = noise_rgba(2400, 600);
    let config = CompressionConfig::default();
    let estimator = EncodedSizeEstimator::default();

    let plan = image_handler::plan(image, 0.0, &config, &estimator).expect("plan should succeed");

    assert_eq!(plan.stage, PlanStage::Exhausted);
    assert_eq!(plan.choice.format, OutputFormat::Jpeg);
    assert_eq!(plan.choice.quality, Some(75));
    assert_eq!(plan.choice.dimensions(), (960, 240));
    assert_eq!(plan.image.dimensions(), (960, 240));
    assert!(!plan.within_budget());
}

#[test]
fn estimate_matches_written_size() {
    let image = noise_rgba(64, 48);
    let config = CompressionConfig::default();
    let estimator = EncodedSizeEstimator::default();

    let plan = image_handler::plan(image, 1.0, &config, &estimator).expect("plan should succeed");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.jpg");
    let size = image_handler::write_image(&plan.image, &plan.choice, &path, config.background)
        .expect("write should succeed");

    assert!((size as f64 / 1024.0 - plan.estimated_kb).abs() < 1e-9);
}
