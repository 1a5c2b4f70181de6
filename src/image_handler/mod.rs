//! # 图片压缩模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块将“体积估算 → 压缩规划 → 落盘”拆成以下子模块：
//!
//! - `config`：压缩搜索参数（阈值、质量序列、缩放序列、滤镜、底色）
//! - `encoding`：输出格式与候选编码方案
//! - `encoder`：内存编码 + 透明通道合成
//! - `estimator`：体积估算（`SizeEstimator` trait）
//! - `pipeline`：尺寸计算与缩放
//! - `planner`：核心规划算法
//! - `writer`：落盘并回报文件大小
//! - `error`：错误模型
//!
//! ## 调用链
//!
//! ```text
//! workflow.rs
//!    ↓
//! planner::plan（纯计算，按候选列表依次尝试）
//!    ├─ estimator.rs → encoder.rs（内存编码测量）
//!    └─ pipeline.rs（预缩放 / 比例缩放）
//!    ↓
//! writer::write_image → encoder.rs（同一编码路径落盘）
//! ```

mod config;
mod encoder;
mod encoding;
mod error;
mod estimator;
mod pipeline;
mod planner;
mod writer;

pub use config::{CompressionConfig, ResizeFilter};
pub use encoder::{encode_to_vec, flatten_onto_background};
pub use encoding::{EncodingChoice, OutputFormat};
pub use error::ImageError;
pub use estimator::{EncodedSizeEstimator, SizeEstimator};
pub use pipeline::{downscaled_dimensions, scaled_dimensions};
pub use planner::{lossy_candidates, plan, CompressionPlan, PlanAttempt, PlanStage};
pub use writer::write_image;
