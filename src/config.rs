//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;
use std::time::Duration;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 普通页面请求超时（单位：秒）
    pub http_timeout: u64,
    // 审计工具探测超时（--version，单位：秒）
    pub probe_timeout: u64,
    // 审计工具运行超时（单位：秒）
    pub audit_timeout: u64,
    // 浏览器启动等待时间（单位：毫秒）
    pub browser_startup_grace_ms: u64,
    // 是否尝试使用 Lighthouse
    pub use_lighthouse: bool,
    // 独立审计命令（程序 + 前置参数）
    pub auditor_command: Vec<String>,
    // 浏览器辅助模式下通过 npx 调用的审计命令
    pub npx_auditor_command: Vec<String>,
    // 浏览器候选路径，None 时使用当前系统的默认路径
    pub browser_candidates: Option<Vec<PathBuf>>,
    // 浏览器远程调试端口
    pub remote_debugging_port: u16,
    // 请求 User-Agent
    pub user_agent: String,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_timeout: 10,
            probe_timeout: 10,
            audit_timeout: 60,
            browser_startup_grace_ms: 5_000,
            use_lighthouse: true,
            auditor_command: vec![node_command("lighthouse")],
            npx_auditor_command: vec![node_command("npx"), "lighthouse".to_string()],
            browser_candidates: None,
            remote_debugging_port: 9222,
            user_agent: format!("rsleadgen/{}", env!("CARGO_PKG_VERSION")),
            verbose: false,
        }
    }
}

// Windows 下 npm 安装的命令是 .cmd 包装脚本
fn node_command(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.cmd", name)
    } else {
        name.to_string()
    }
}

impl GlobalConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout)
    }

    pub fn audit_timeout(&self) -> Duration {
        Duration::from_secs(self.audit_timeout)
    }

    pub fn browser_startup_grace(&self) -> Duration {
        Duration::from_millis(self.browser_startup_grace_ms)
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn probe_timeout(mut self, timeout: u64) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    pub fn audit_timeout(mut self, timeout: u64) -> Self {
        self.config.audit_timeout = timeout;
        self
    }

    pub fn browser_startup_grace_ms(mut self, grace_ms: u64) -> Self {
        self.config.browser_startup_grace_ms = grace_ms;
        self
    }

    pub fn use_lighthouse(mut self, enabled: bool) -> Self {
        self.config.use_lighthouse = enabled;
        self
    }

    pub fn auditor_command(mut self, command: Vec<String>) -> Self {
        self.config.auditor_command = command;
        self
    }

    pub fn npx_auditor_command(mut self, command: Vec<String>) -> Self {
        self.config.npx_auditor_command = command;
        self
    }

    pub fn browser_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.config.browser_candidates = Some(candidates);
        self
    }

    pub fn remote_debugging_port(mut self, port: u16) -> Self {
        self.config.remote_debugging_port = port;
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
