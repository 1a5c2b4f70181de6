//! # 剪贴板图片发布工具 — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与协作者构造。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use clipboard_publisher::clipboard::SystemClipboard;
use clipboard_publisher::error::AppError;
use clipboard_publisher::image_handler::EncodedSizeEstimator;
use clipboard_publisher::publisher::GitCli;
use clipboard_publisher::settings::{AppSettings, SettingsOverrides};
use clipboard_publisher::workflow::{self, RunOutcome};

#[derive(Parser, Debug)]
#[command(name = "clipboard-publisher")]
#[command(version, about = "保存剪贴板图片并发布到 GitHub 仓库", long_about = None)]
struct Args {
    /// 设置文件路径（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 最大文件大小（KB）
    #[arg(long)]
    max_size_kb: Option<f64>,

    /// 图片保存目录
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Git 仓库目录
    #[arg(long)]
    repo_dir: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 打印生效的设置后退出
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            log::error!("❌ {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, AppError> {
    let settings = AppSettings::load(args.config.as_deref())?.with_overrides(SettingsOverrides {
        max_size_kb: args.max_size_kb,
        images_dir: args.images_dir,
        repo_dir: args.repo_dir,
    });
    settings.validate()?;

    if args.print_config {
        let json = serde_json::to_string_pretty(&settings)
            .map_err(|e| AppError::Config(format!("序列化设置失败: {}", e)))?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    let mut clipboard = SystemClipboard::new(settings.hold_clipboard);
    let git = GitCli::new(settings.git_program.clone(), settings.repo_dir.clone());
    let estimator = EncodedSizeEstimator::new(settings.compression.background);

    let outcome = workflow::run(
        &settings,
        &mut clipboard,
        &git,
        &estimator,
        chrono::Local::now(),
    )?;

    print_summary(&outcome);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_summary(outcome: &RunOutcome) {
    let summary = match outcome {
        RunOutcome::NoImage => {
            println!("❌ 操作失败：剪贴板中没有图片");
            return;
        }
        RunOutcome::Saved(summary) => summary,
    };

    if !summary.published {
        println!("⚠️ 图片已保存到本地，但 Git 操作失败");
        println!("本地路径：{}", summary.path.display());
        return;
    }

    println!("✅ 操作完成！");
    println!("图片编码：{}（{:?}）", summary.choice, summary.stage);
    println!("文件大小：{:.2} KB", summary.byte_size as f64 / 1024.0);
    match (&summary.public_url, summary.url_copied) {
        (Some(url), true) => println!("GitHub 链接：{}（已复制到剪贴板）", url),
        (Some(url), false) => println!("GitHub 链接：{}（复制到剪贴板失败）", url),
        (None, _) => println!("⚠️ 无法生成 GitHub 链接"),
    }
    println!("本地路径：{}", summary.path.display());
}
