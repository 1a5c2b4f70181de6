//! 完整流程（假剪贴板 + 假版本控制 + 真实编码器）的集成测试。

mod common;

use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use clipboard_publisher::image_handler::{EncodedSizeEstimator, OutputFormat, PlanStage};
use clipboard_publisher::settings::{AppSettings, GitHubDefaults};
use clipboard_publisher::workflow::{self, RunOutcome};

use common::{noise_rgba, solid_rgb, FakeClipboard, FakeVcs};

const EXPECTED_NAME: &str = "clipboard_image_20260304_050607.png";

fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 3, 4, 5, 6, 7)
        .single()
        .expect("valid local time")
}

fn settings_for(repo: &Path) -> AppSettings {
    AppSettings {
        images_dir: repo.join("images"),
        repo_dir: repo.to_path_buf(),
        github: GitHubDefaults::default(),
        ..AppSettings::default()
    }
}

#[test]
fn saves_publishes_and_copies_url() {
    let repo = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(repo.path());
    let mut clipboard = FakeClipboard::with_image(solid_rgb(200, 200));
    let vcs = FakeVcs::new(repo.path());

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &vcs,
        &EncodedSizeEstimator::default(),
        fixed_now(),
    )
    .expect("run should succeed");

    let RunOutcome::Saved(summary) = &outcome else {
        panic!("expected a saved image, got {outcome:?}");
    };
    assert!(outcome.is_success());
    assert_eq!(summary.stage, PlanStage::Baseline);
    assert_eq!(summary.choice.format, OutputFormat::Png);
    assert_eq!(summary.path, repo.path().join("images").join(EXPECTED_NAME));
    assert!(summary.path.is_file());

    let url = format!("https://raw.githubusercontent.com/octocat/pics/main/images/{EXPECTED_NAME}");
    assert_eq!(summary.public_url.as_deref(), Some(url.as_str()));
    assert!(summary.url_copied);
    assert_eq!(clipboard.written, vec![url]);
    assert_eq!(
        summary.asset.as_ref().map(|a| a.relative_path.as_str()),
        Some("images/clipboard_image_20260304_050607.png")
    );
}

#[test]
fn empty_clipboard_ends_early_without_files() {
    let repo = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(repo.path());
    let mut clipboard = FakeClipboard::default();
    let vcs = FakeVcs::new(repo.path());

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &vcs,
        &EncodedSizeEstimator::default(),
        fixed_now(),
    )
    .expect("run should succeed");

    assert_eq!(outcome, RunOutcome::NoImage);
    assert!(!outcome.is_success());
    assert!(vcs.calls().is_empty());
    let entries = std::fs::read_dir(repo.path().join("images")).expect("images dir exists");
    assert_eq!(entries.count(), 0);
}

#[test]
fn clipboard_read_error_is_treated_as_no_image() {
    let repo = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(repo.path());
    let mut clipboard = FakeClipboard {
        fail_read: true,
        ..FakeClipboard::default()
    };
    let vcs = FakeVcs::new(repo.path());

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &vcs,
        &EncodedSizeEstimator::default(),
        fixed_now(),
    )
    .expect("run should succeed");

    assert_eq!(outcome, RunOutcome::NoImage);
}

#[test]
fn publish_failure_keeps_file_and_skips_clipboard() {
    let repo = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(repo.path());
    let mut clipboard = FakeClipboard::with_image(solid_rgb(64, 64));
    let mut vcs = FakeVcs::new(repo.path());
    vcs.fail_on = Some("push");

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &vcs,
        &EncodedSizeEstimator::default(),
        fixed_now(),
    )
    .expect("run should succeed");

    let RunOutcome::Saved(summary) = &outcome else {
        panic!("expected a saved image, got {outcome:?}");
    };
    assert!(!outcome.is_success());
    assert!(!summary.published);
    assert!(summary.path.is_file());
    assert_eq!(summary.public_url, None);
    assert!(!summary.url_copied);
    assert!(clipboard.written.is_empty());
}

#[test]
fn images_outside_repo_skip_url_but_stay_published() {
    let repo = tempfile::tempdir().expect("tempdir");
    let elsewhere = tempfile::tempdir().expect("tempdir");
    let settings = AppSettings {
        images_dir: elsewhere.path().join("images"),
        ..settings_for(repo.path())
    };
    let mut clipboard = FakeClipboard::with_image(solid_rgb(64, 64));
    let vcs = FakeVcs::new(repo.path());

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &vcs,
        &EncodedSizeEstimator::default(),
        fixed_now(),
    )
    .expect("run should succeed");

    let RunOutcome::Saved(summary) = &outcome else {
        panic!("expected a saved image, got {outcome:?}");
    };
    assert!(summary.published);
    assert_eq!(summary.public_url, None);
    assert_eq!(summary.asset, None);
    assert!(clipboard.written.is_empty());
}

#[test]
fn clipboard_write_failure_is_reported_in_summary() {
    let repo = tempfile::tempdir().expect("tempdir");
    let settings = settings_for(repo.path());
    let mut clipboard = FakeClipboard {
        fail_write: true,
        ..FakeClipboard::with_image(solid_rgb(64, 64))
    };
    let vcs = FakeVcs::new(repo.path());

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &vcs,
        &EncodedSizeEstimator::default(),
        fixed_now(),
    )
    .expect("run should succeed");

    let RunOutcome::Saved(summary) = &outcome else {
        panic!("expected a saved image, got {outcome:?}");
    };
    assert!(outcome.is_success());
    assert!(summary.public_url.is_some());
    assert!(!summary.url_copied);
}

#[test]
fn oversized_image_is_saved_as_jpeg() {
    let repo = tempfile::tempdir().expect("tempdir");
    let settings = AppSettings {
        max_size_kb: 40.0,
        ..settings_for(repo.path())
    };
    let mut clipboard = FakeClipboard::with_image(noise_rgba(256, 256));
    let vcs = FakeVcs::new(repo.path());

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &vcs,
        &EncodedSizeEstimator::default(),
        fixed_now(),
    )
    .expect("run should succeed");

    let RunOutcome::Saved(summary) = &outcome else {
        panic!("expected a saved image, got {outcome:?}");
    };
    assert_eq!(summary.choice.format, OutputFormat::Jpeg);
    assert_eq!(
        summary.path.file_name().and_then(|n| n.to_str()),
        Some("clipboard_image_20260304_050607.jpg")
    );
    assert!(summary
        .public_url
        .as_deref()
        .is_some_and(|url| url.ends_with("/images/clipboard_image_20260304_050607.jpg")));
}
