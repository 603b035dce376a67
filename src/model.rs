//! 分析结果数据模型定义
//! Findings 在各分析阶段之间传递，AnalysisResult 只能通过优先级计算得到

use std::fmt;
use serde::{Deserialize, Serialize};

/// 四项评分的字段名（与序列化键一致）
pub const SCORE_KEYS: [&str; 4] = [
    "performance_score",
    "seo_score",
    "accessibility_score",
    "best_practices_score",
];

/// 分析过程中的可变记录
///
/// `issues` 只能追加，不提供删除或重排接口。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    pub performance_score: u8,
    pub seo_score: u8,
    pub accessibility_score: u8,
    pub best_practices_score: u8,
    pub has_ssl: bool,
    pub has_mobile_viewport: bool,
    issues: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条问题描述
    pub fn add_issue(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// 四项评分，顺序同 SCORE_KEYS
    pub fn scores(&self) -> [u8; 4] {
        [
            self.performance_score,
            self.seo_score,
            self.accessibility_score,
            self.best_practices_score,
        ]
    }

    /// 四项评分的算术平均值
    pub fn average_score(&self) -> f64 {
        let scores = self.scores();
        scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64
    }
}

/// 线索优先级（1 最高）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    /// 网站无法访问
    High = 1,
    /// 网站质量较差
    Medium = 2,
    /// 网站质量良好
    Low = 3,
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(format!("无效优先级：{}（取值范围 1-3）", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// 单个网站的最终分析结果（只能由优先级计算生成，字段只读）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    findings: Findings,
    priority: Priority,
}

impl AnalysisResult {
    pub(crate) fn new(findings: Findings, priority: Priority) -> Self {
        Self { findings, priority }
    }

    pub fn findings(&self) -> &Findings {
        &self.findings
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn issues(&self) -> &[String] {
        self.findings.issues()
    }

    /// 紧凑 JSON
    pub fn to_compact_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 格式化 JSON
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let findings = &self.findings;
        write!(
            f,
            "priority={} perf={} seo={} a11y={} bp={} issues={}",
            self.priority,
            findings.performance_score,
            findings.seo_score,
            findings.accessibility_score,
            findings.best_practices_score,
            findings.issues().len()
        )
    }
}
