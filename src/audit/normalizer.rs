//! 报告归一化：将 Lighthouse 分类得分与审计项映射为 Findings

use tracing::{debug, warn};

use super::report::AuditReport;
use crate::error::LeadResult;
use crate::model::Findings;

/// 审计项得分低于该值视为问题
const AUDIT_FAIL_THRESHOLD: f64 = 0.5;

/// 需要关注的审计项及对应的问题描述
#[derive(Debug, Clone, Copy)]
enum AuditIssue {
    /// 带耗时/数值展示的指标，(前缀, 缩写)
    Timed(&'static str, &'static str),
    /// 固定描述
    Fixed(&'static str),
}

const WATCHED_AUDITS: [(&str, AuditIssue); 9] = [
    // 性能
    ("largest-contentful-paint", AuditIssue::Timed("Slow content loading", "LCP")),
    ("total-blocking-time", AuditIssue::Timed("Poor interactivity", "TBT")),
    ("cumulative-layout-shift", AuditIssue::Timed("Layout shifts during loading", "CLS")),
    // SEO
    ("meta-description", AuditIssue::Fixed("Missing meta description")),
    ("document-title", AuditIssue::Fixed("Missing or poor document title")),
    // 无障碍
    ("color-contrast", AuditIssue::Fixed("Poor color contrast for text")),
    ("image-alt", AuditIssue::Fixed("Images missing alt text")),
    // 最佳实践
    ("is-on-https", AuditIssue::Fixed("Not using HTTPS")),
    ("doctype", AuditIssue::Fixed("Missing doctype")),
];

/// 报告归一化器
pub struct ReportNormalizer;

impl ReportNormalizer {
    /// 写入得分并追加问题；报告结构异常时追加一条通用问题，已写入的部分保留
    pub fn apply(report: &AuditReport, findings: &mut Findings) {
        if let Err(e) = Self::try_apply(report, findings) {
            warn!("Lighthouse报告处理失败：{}", e);
            findings.add_issue(format!("Error processing Lighthouse results: {}", e));
        }
    }

    fn try_apply(report: &AuditReport, findings: &mut Findings) -> LeadResult<()> {
        // 1. 分类得分，缺失的分类保持原值
        if let Some(score) = report.category_score("performance")? {
            findings.performance_score = to_percent(score);
        }
        if let Some(score) = report.category_score("accessibility")? {
            findings.accessibility_score = to_percent(score);
        }
        if let Some(score) = report.category_score("best-practices")? {
            findings.best_practices_score = to_percent(score);
        }
        if let Some(score) = report.category_score("seo")? {
            findings.seo_score = to_percent(score);
        }

        // 2. 关键审计项
        for (audit_id, issue) in WATCHED_AUDITS {
            let Some(audit) = report.audit(audit_id)? else {
                continue;
            };
            let Some(score) = audit.score()? else {
                continue;
            };
            if score >= AUDIT_FAIL_THRESHOLD {
                continue;
            }

            let message = match issue {
                AuditIssue::Timed(prefix, short) => {
                    let display = audit.display_value()?.unwrap_or_else(|| "n/a".to_string());
                    format!("{} ({}: {})", prefix, short, display)
                }
                AuditIssue::Fixed(text) => text.to_string(),
            };
            debug!("审计项未通过：{}，得分={}", audit_id, score);
            findings.add_issue(message);
        }

        Ok(())
    }
}

/// 0.0-1.0 → 0-100（四舍五入并截断到范围内）
fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
