//! rsleadgen - 英国本地商家网站质量分析与线索优先级工具

// 导出全局错误类型
pub use self::error::{LeadGenError, LeadResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出数据模型
pub use self::model::{AnalysisResult, Findings, Priority, SCORE_KEYS};

// 导出提取模块核心接口
pub use self::extractor::{
    HtmlExtractor, ContactDetails, extract_email, extract_phone_number, extract_postcode
};

// 导出工具模块核心接口
pub use self::utils::{clean_url, format_business_type, validate_uk_location};

// 导出审计模块核心接口
pub use self::audit::{AuditorAvailability, AuditorProbe, AuditRunner, AuditReport, ReportNormalizer};

// 导出分析模块核心接口
pub use self::analyzer::{
    WebsiteAnalyzer, BasicProber, HeuristicAnalyzer, PriorityCalculator
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod model;
pub mod extractor;
pub mod utils;
pub mod audit;
pub mod analyzer;

#[cfg(test)]
mod test_support;
