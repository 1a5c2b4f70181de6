//! 远端地址解析
//!
//! 支持三种常见写法：
//! - SCP 风格 SSH：`git@github.com:owner/repo.git`
//! - URL 风格 SSH：`ssh://git@github.com:22/owner/repo.git`
//! - HTTPS：`https://github.com/owner/repo.git`（可带 `user@`）
//!
//! 仅接受 `owner/repo` 两段路径；多级分组等其他形式返回 `None`，由调用方回退到默认配置。

use once_cell::sync::Lazy;
use regex::Regex;

/// 解析后的远端仓库信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

static URL_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?|ssh|git)://(?:[^@/]+@)?([^/:]+)(?::\d+)?/([\w.-]+)/([\w.-]+?)(?:\.git)?/?$")
        .expect("remote url pattern must compile")
});

static SCP_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[\w.-]+@)?([\w.-]+):/?([\w.-]+)/([\w.-]+?)(?:\.git)?/?$")
        .expect("scp-like remote pattern must compile")
});

/// 解析远端地址。
pub fn parse_remote_url(url: &str) -> Option<RemoteRepo> {
    let url = url.trim();
    let captures = URL_FORM
        .captures(url)
        .or_else(|| SCP_FORM.captures(url))?;

    Some(RemoteRepo {
        host: captures[1].to_string(),
        owner: captures[2].to_string(),
        repo: captures[3].to_string(),
    })
}
