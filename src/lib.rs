//! # 剪贴板图片发布工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  main (clap 参数 + env_logger)            │
//! │       │  加载 AppSettings → 校验 → 构造协作者             │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↓ workflow::run
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓                                                  │
//! │  clipboard ── 读取位图 ─────────────┐                    │
//! │                                     ↓                    │
//! │  image_handler ── plan ── 基线 PNG → 质量扫描 → 缩放扫描 │
//! │       │            └─ SizeEstimator (编码即估算)         │
//! │       ↓                                                  │
//! │  storage ── 时间戳文件名 → write_image 落盘              │
//! │       ↓                                                  │
//! │  publisher ── git add / commit / push                    │
//! │       │   └─ remote 解析 → 公开网址                      │
//! │       ↓                                                  │
//! │  clipboard ── 写回网址                                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`clipboard`] | 剪贴板读图 / 写文本（`ClipboardAccess`） |
//! | [`image_handler`] | 压缩规划、缩放、编码与落盘 |
//! | [`publisher`] | Git 发布、远端解析、公开网址 |
//! | [`settings`] | JSON 设置文件与命令行覆盖 |
//! | [`storage`] | 图片目录创建与文件命名 |
//! | [`workflow`] | 单次运行的完整编排 |

pub mod error;
pub mod clipboard;
pub mod image_handler;
pub mod publisher;
pub mod settings;
pub mod storage;
pub mod workflow;
