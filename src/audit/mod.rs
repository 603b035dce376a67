//! 审计模块：Lighthouse 探测、调用与报告归一化
pub mod probe;
pub mod runner;
pub mod report;
pub mod normalizer;
mod process;

pub use self::probe::{AuditorAvailability, AuditorProbe};
pub use self::runner::{AuditRunner, ReportFile, AUDIT_CATEGORIES};
pub use self::report::{AuditEntry, AuditReport};
pub use self::normalizer::ReportNormalizer;
