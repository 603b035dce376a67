//! 线索优先级计算

use crate::analyzer::basic::ACCESS_ERROR_MARKER;
use crate::model::{AnalysisResult, Findings, Priority};

/// 平均分低于该值视为网站质量较差
const POOR_AVERAGE_SCORE: f64 = 60.0;
/// 问题数超过该值视为网站质量较差
const MAX_ISSUES_FOR_GOOD_SITE: usize = 3;

/// 优先级计算器
pub struct PriorityCalculator;

impl PriorityCalculator {
    /// 按规则依次判断：无法访问 → 1，质量较差 → 2，否则 → 3
    pub fn calculate(findings: &Findings) -> Priority {
        if findings.issues().iter().any(|issue| issue.contains(ACCESS_ERROR_MARKER)) {
            return Priority::High;
        }

        if findings.average_score() < POOR_AVERAGE_SCORE
            || findings.issues().len() > MAX_ISSUES_FOR_GOOD_SITE
        {
            return Priority::Medium;
        }

        Priority::Low
    }

    /// 计算优先级并生成最终结果
    pub fn finalize(findings: Findings) -> AnalysisResult {
        let priority = Self::calculate(&findings);
        AnalysisResult::new(findings, priority)
    }
}
