//! Lighthouse 调用器
//! 执行顺序：浏览器辅助模式 → 独立命令回退 → 解析报告
//! 报告临时文件由 ReportFile 持有，任何返回路径上都会被删除

use std::path::{Path, PathBuf};
use tempfile::{TempDir, TempPath};
use tracing::{debug, info, warn};

use super::probe::AuditorAvailability;
use super::process::{run_with_timeout, spawn};
use super::report::AuditReport;
use crate::config::GlobalConfig;
use crate::error::LeadResult;

/// 只审计这四个分类
pub const AUDIT_CATEGORIES: &str = "performance,accessibility,best-practices,seo";

/// 报告临时文件，drop 时删除
#[derive(Debug)]
pub struct ReportFile {
    path: TempPath,
}

impl ReportFile {
    pub fn create() -> LeadResult<Self> {
        let path = tempfile::Builder::new()
            .prefix("rsleadgen-lighthouse-")
            .suffix(".json")
            .tempfile()?
            .into_temp_path();
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件存在且非空
    pub async fn has_content(&self) -> bool {
        tokio::fs::metadata(self.path())
            .await
            .map(|meta| meta.len() > 0)
            .unwrap_or(false)
    }

    /// 读取并解析报告，文件缺失或为空时返回 None
    pub async fn read_report(&self) -> LeadResult<Option<AuditReport>> {
        if !self.has_content().await {
            return Ok(None);
        }
        let data = tokio::fs::read(self.path()).await?;
        AuditReport::from_slice(&data).map(Some)
    }
}

/// 调用阶段
#[derive(Debug)]
enum AuditStage {
    BrowserAssisted(PathBuf),
    Standalone,
    Parse,
}

/// Lighthouse 调用器
#[derive(Debug, Clone)]
pub struct AuditRunner {
    config: GlobalConfig,
    availability: AuditorAvailability,
}

impl AuditRunner {
    pub fn new(config: GlobalConfig, availability: AuditorAvailability) -> Self {
        Self { config, availability }
    }

    pub fn availability(&self) -> &AuditorAvailability {
        &self.availability
    }

    /// 审计一个URL；工具不可用、超时或未生成报告时返回 None
    pub async fn run(&self, url: &str) -> Option<AuditReport> {
        let mut stage = match &self.availability {
            AuditorAvailability::Unavailable => return None,
            AuditorAvailability::BrowserAssisted { browser } => AuditStage::BrowserAssisted(browser.clone()),
            AuditorAvailability::Standalone => AuditStage::Standalone,
        };

        let report_file = match ReportFile::create() {
            Ok(file) => file,
            Err(e) => {
                warn!("创建报告临时文件失败：{}", e);
                return None;
            }
        };

        loop {
            debug!(url = url, stage = ?stage, "Lighthouse 调用阶段");
            stage = match stage {
                AuditStage::BrowserAssisted(browser) => {
                    if let Err(e) = self.run_browser_assisted(&browser, url, report_file.path()).await {
                        warn!("浏览器辅助模式运行 Lighthouse 失败：{}", e);
                    }
                    if report_file.has_content().await {
                        AuditStage::Parse
                    } else {
                        AuditStage::Standalone
                    }
                }
                AuditStage::Standalone => {
                    info!(url = url, "使用独立 Lighthouse 命令");
                    let args = self.standalone_args(url, report_file.path());
                    match run_with_timeout(&self.config.auditor_command, &args, self.config.audit_timeout()).await {
                        Ok(status) if !status.success() => {
                            warn!("Lighthouse 退出码非零：{:?}", status.code());
                        }
                        Ok(_) => {}
                        Err(e) => {
                            warn!("Lighthouse 运行失败：{}", e);
                            return None;
                        }
                    }
                    AuditStage::Parse
                }
                AuditStage::Parse => {
                    return match report_file.read_report().await {
                        Ok(Some(report)) => Some(report),
                        Ok(None) => {
                            warn!(url = url, "Lighthouse 未生成报告");
                            None
                        }
                        Err(e) => {
                            warn!("Lighthouse 报告解析失败：{}", e);
                            None
                        }
                    };
                }
            };
        }
    }

    /// 启动无头浏览器，等待启动后经 npx 调用 Lighthouse，结束后关闭浏览器
    async fn run_browser_assisted(&self, browser: &Path, url: &str, output_path: &Path) -> LeadResult<()> {
        info!(browser = ?browser, url = url, "使用浏览器运行 Lighthouse");
        let profile_dir = TempDir::new()?;
        let browser_command = vec![browser.to_string_lossy().into_owned()];
        let mut browser_process = spawn(&browser_command, &self.browser_args(profile_dir.path()))?;

        tokio::time::sleep(self.config.browser_startup_grace()).await;

        let args = self.npx_args(url, output_path);
        let result = run_with_timeout(&self.config.npx_auditor_command, &args, self.config.audit_timeout()).await;

        // 无论 Lighthouse 结果如何都要关闭浏览器
        if let Err(e) = browser_process.kill().await {
            debug!("关闭浏览器进程失败：{}", e);
        }
        drop(profile_dir);

        let status = result?;
        if !status.success() {
            debug!("npx Lighthouse 退出码：{:?}", status.code());
        }
        Ok(())
    }

    fn browser_args(&self, profile_dir: &Path) -> Vec<String> {
        vec![
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            format!("--remote-debugging-port={}", self.config.remote_debugging_port),
            "--enable-automation".to_string(),
            "--no-sandbox".to_string(),
            format!("--user-data-dir={}", profile_dir.display()),
        ]
    }

    fn npx_args(&self, url: &str, output_path: &Path) -> Vec<String> {
        vec![
            url.to_string(),
            "--output=json".to_string(),
            format!("--output-path={}", output_path.display()),
            format!("--port={}", self.config.remote_debugging_port),
            "--chrome-flags=--headless".to_string(),
            format!("--only-categories={}", AUDIT_CATEGORIES),
        ]
    }

    fn standalone_args(&self, url: &str, output_path: &Path) -> Vec<String> {
        vec![
            url.to_string(),
            "--chrome-flags=--headless --no-sandbox --disable-gpu".to_string(),
            "--output=json".to_string(),
            format!("--output-path={}", output_path.display()),
            format!("--only-categories={}", AUDIT_CATEGORIES),
            "--quiet".to_string(),
        ]
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use std::path::PathBuf;

    const REPORT_JSON: &str = r#"{"categories":{"performance":{"score":0.9}},"audits":{}}"#;

    /// 写一个替代 Lighthouse 的 sh 脚本：把 --output-path 记录到 marker，再执行 body
    fn fake_lighthouse(dir: &Path, name: &str, body: &str) -> (Vec<String>, PathBuf) {
        let script = dir.join(format!("{}.sh", name));
        let marker = dir.join(format!("{}.marker", name));
        let content = format!(
            "for arg in \"$@\"; do\n  case \"$arg\" in\n    --output-path=*) out=\"${{arg#--output-path=}}\" ;;\n  esac\ndone\necho \"$out\" > '{}'\n{}\n",
            marker.display(),
            body
        );
        std::fs::write(&script, content).unwrap();
        (vec!["sh".to_string(), script.display().to_string()], marker)
    }

    fn recorded_path(marker: &Path) -> PathBuf {
        PathBuf::from(std::fs::read_to_string(marker).unwrap().trim())
    }

    #[tokio::test]
    async fn test_unavailable_returns_none() {
        let runner = AuditRunner::new(ConfigManager::get_default(), AuditorAvailability::Unavailable);
        assert!(runner.run("https://example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_standalone_report_is_parsed_and_file_removed() {
        let dir = tempfile::tempdir().unwrap();
        let (command, marker) = fake_lighthouse(
            dir.path(),
            "ok",
            &format!("printf '%s' '{}' > \"$out\"", REPORT_JSON),
        );
        let config = ConfigManager::custom().auditor_command(command).build();
        let runner = AuditRunner::new(config, AuditorAvailability::Standalone);

        let report = runner.run("https://example.com").await.expect("应当生成报告");
        assert_eq!(report.category_score("performance").unwrap(), Some(0.9));

        let output = recorded_path(&marker);
        assert!(output.to_string_lossy().ends_with(".json"));
        assert!(!output.exists(), "临时报告文件未删除：{:?}", output);
    }

    #[tokio::test]
    async fn test_timeout_returns_none_and_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let (command, marker) = fake_lighthouse(dir.path(), "slow", "exec sleep 5");
        let config = ConfigManager::custom().auditor_command(command).audit_timeout(1).build();
        let runner = AuditRunner::new(config, AuditorAvailability::Standalone);

        assert!(runner.run("https://example.com").await.is_none());

        let output = recorded_path(&marker);
        assert!(!output.as_os_str().is_empty());
        assert!(!output.exists(), "超时后临时报告文件仍存在：{:?}", output);
    }

    #[tokio::test]
    async fn test_empty_or_invalid_output_is_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let (empty, empty_marker) = fake_lighthouse(dir.path(), "empty", "exit 0");
        let runner = AuditRunner::new(
            ConfigManager::custom().auditor_command(empty).build(),
            AuditorAvailability::Standalone,
        );
        assert!(runner.run("https://example.com").await.is_none());
        assert!(!recorded_path(&empty_marker).exists());

        let (garbage, garbage_marker) = fake_lighthouse(dir.path(), "garbage", "echo 'not json' > \"$out\"\nexit 1");
        let runner = AuditRunner::new(
            ConfigManager::custom().auditor_command(garbage).build(),
            AuditorAvailability::Standalone,
        );
        assert!(runner.run("https://example.com").await.is_none());
        assert!(!recorded_path(&garbage_marker).exists());
    }

    #[tokio::test]
    async fn test_browser_assisted_uses_npx_report() {
        let dir = tempfile::tempdir().unwrap();
        let (npx, marker) = fake_lighthouse(
            dir.path(),
            "npx",
            &format!("printf '%s' '{}' > \"$out\"", REPORT_JSON),
        );
        let config = ConfigManager::custom()
            .npx_auditor_command(npx)
            .auditor_command(vec!["rsleadgen-no-such-binary".to_string()])
            .browser_startup_grace_ms(10)
            .build();
        let availability = AuditorAvailability::BrowserAssisted { browser: PathBuf::from("/bin/sh") };
        let runner = AuditRunner::new(config, availability);

        let report = runner.run("https://example.com").await.expect("应当生成报告");
        assert_eq!(report.category_score("performance").unwrap(), Some(0.9));
        assert!(!recorded_path(&marker).exists());
    }

    #[tokio::test]
    async fn test_browser_assisted_falls_back_to_standalone() {
        let dir = tempfile::tempdir().unwrap();
        let (npx, _) = fake_lighthouse(dir.path(), "npx-empty", "exit 1");
        let (standalone, marker) = fake_lighthouse(
            dir.path(),
            "standalone",
            &format!("printf '%s' '{}' > \"$out\"", REPORT_JSON),
        );
        let config = ConfigManager::custom()
            .npx_auditor_command(npx)
            .auditor_command(standalone)
            .browser_startup_grace_ms(10)
            .build();
        let availability = AuditorAvailability::BrowserAssisted { browser: PathBuf::from("/bin/sh") };
        let runner = AuditRunner::new(config, availability);

        assert!(runner.run("https://example.com").await.is_some());
        assert!(marker.exists(), "独立命令应被调用");
        assert!(!recorded_path(&marker).exists());
    }

    #[test]
    fn test_standalone_args_contract() {
        let runner = AuditRunner::new(ConfigManager::get_default(), AuditorAvailability::Standalone);
        let args = runner.standalone_args("https://example.com", Path::new("/tmp/r.json"));
        assert_eq!(args[0], "https://example.com");
        assert!(args.contains(&"--output=json".to_string()));
        assert!(args.contains(&"--output-path=/tmp/r.json".to_string()));
        assert!(args.contains(&format!("--only-categories={}", AUDIT_CATEGORIES)));
    }
}
