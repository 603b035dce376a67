//! 审计工具探测：查找本机浏览器，否则检查独立 Lighthouse 命令是否可用

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use super::process::run_with_timeout;
use crate::config::GlobalConfig;

/// 审计工具可用状态（构造分析器时确定，之后不再变化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditorAvailability {
    /// 找到本机浏览器，先启动浏览器再通过 npx 调用 Lighthouse
    BrowserAssisted { browser: PathBuf },
    /// 仅独立 Lighthouse 命令可用
    Standalone,
    /// 不可用，使用启发式分析
    Unavailable,
}

impl AuditorAvailability {
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    pub fn browser(&self) -> Option<&Path> {
        match self {
            Self::BrowserAssisted { browser } => Some(browser),
            _ => None,
        }
    }
}

/// 审计工具探测器
pub struct AuditorProbe;

impl AuditorProbe {
    /// 探测审计工具
    pub async fn detect(config: &GlobalConfig) -> AuditorAvailability {
        if !config.use_lighthouse {
            debug!("配置禁用 Lighthouse");
            return AuditorAvailability::Unavailable;
        }

        let start = Instant::now();
        let candidates = config
            .browser_candidates
            .clone()
            .unwrap_or_else(Self::default_browser_candidates);

        if let Some(browser) = Self::find_browser(&candidates) {
            info!(browser = ?browser, "找到浏览器，可通过 DevTools 协议运行 Lighthouse");
            return AuditorAvailability::BrowserAssisted { browser };
        }

        let args = ["--version".to_string()];
        let availability = match run_with_timeout(&config.auditor_command, &args, config.probe_timeout()).await {
            Ok(status) if status.success() => AuditorAvailability::Standalone,
            Ok(status) => {
                debug!("Lighthouse 版本检查退出码：{:?}", status.code());
                AuditorAvailability::Unavailable
            }
            Err(e) => {
                debug!("Lighthouse 版本检查失败：{}", e);
                AuditorAvailability::Unavailable
            }
        };

        info!(
            availability = ?availability,
            duration_ms = start.elapsed().as_millis(),
            "审计工具探测完成"
        );
        availability
    }

    /// 返回第一个存在的浏览器路径
    pub fn find_browser(candidates: &[PathBuf]) -> Option<PathBuf> {
        candidates.iter().find(|path| path.exists()).cloned()
    }

    /// 当前系统的浏览器默认安装路径
    pub fn default_browser_candidates() -> Vec<PathBuf> {
        match env::consts::OS {
            "windows" => {
                let program_files = env::var("PROGRAMFILES")
                    .unwrap_or_else(|_| "C:\\Program Files".to_string());
                let program_files_x86 = env::var("PROGRAMFILES(X86)")
                    .unwrap_or_else(|_| "C:\\Program Files (x86)".to_string());
                vec![
                    PathBuf::from(program_files).join("Google\\Chrome\\Application\\chrome.exe"),
                    PathBuf::from(program_files_x86).join("Google\\Chrome\\Application\\chrome.exe"),
                ]
            }
            "macos" => vec![PathBuf::from(
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            )],
            _ => [
                "/usr/bin/google-chrome",
                "/usr/bin/chrome",
                "/usr/bin/chromium",
                "/usr/bin/chromium-browser",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}
