//! 网站分析器：串联基础检测、Lighthouse 审计（或启发式分析）与优先级计算
use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info};

use super::basic::BasicProber;
use super::fallback::HeuristicAnalyzer;
use super::priority::PriorityCalculator;
use crate::audit::{AuditRunner, AuditorAvailability, AuditorProbe, ReportNormalizer};
use crate::config::GlobalConfig;
use crate::error::LeadResult;
use crate::model::{AnalysisResult, Findings};
use crate::utils::ensure_scheme;

/// 网站分析器
#[derive(Debug, Clone)]
pub struct WebsiteAnalyzer {
    client: Client,
    auditor: AuditRunner,
    verbose: bool,
}

impl WebsiteAnalyzer {
    /// 创建分析器，并探测一次审计工具
    pub async fn new(config: GlobalConfig) -> LeadResult<Self> {
        let availability = AuditorProbe::detect(&config).await;
        Self::with_availability(config, availability)
    }

    /// 使用已知的审计工具状态创建分析器（不再探测）
    pub fn with_availability(config: GlobalConfig, availability: AuditorAvailability) -> LeadResult<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            verbose: config.verbose,
            auditor: AuditRunner::new(config, availability),
        })
    }

    pub fn availability(&self) -> &AuditorAvailability {
        self.auditor.availability()
    }

    /// 分析单个网站，错误均记录在 issues 中
    pub async fn analyze(&self, url: &str) -> AnalysisResult {
        let start = Instant::now();
        let mut findings = Findings::new();

        let url = url.trim();
        if url.is_empty() {
            findings.add_issue("No URL provided");
            return PriorityCalculator::finalize(findings);
        }
        let url = ensure_scheme(url);

        // 1. 基础检测
        BasicProber::probe(&self.client, &url, &mut findings).await;

        // 2. Lighthouse 审计，不可用或无报告时使用启发式分析
        if self.availability().is_available() {
            match self.auditor.run(&url).await {
                Some(report) => ReportNormalizer::apply(&report, &mut findings),
                None => {
                    findings.add_issue("Lighthouse produced no report, using basic analysis");
                    HeuristicAnalyzer::analyze(&self.client, &url, &mut findings).await;
                }
            }
        } else {
            findings.add_issue("Lighthouse not available for detailed analysis");
            HeuristicAnalyzer::analyze(&self.client, &url, &mut findings).await;
        }

        // 3. 优先级
        let result = PriorityCalculator::finalize(findings);
        info!(
            url = %url,
            priority = %result.priority(),
            issues = result.issues().len(),
            duration_ms = start.elapsed().as_millis(),
            "网站分析完成"
        );
        if self.verbose {
            for issue in result.issues() {
                info!(url = %url, "问题：{}", issue);
            }
        }
        result
    }

    /// 逐个分析多个网站（顺序执行）
    pub async fn analyze_many<I, S>(&self, urls: I) -> Vec<AnalysisResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Vec::new();
        for url in urls {
            debug!(url = url.as_ref(), "开始分析");
            results.push(self.analyze(url.as_ref()).await);
        }
        results
    }
}
