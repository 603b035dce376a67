//! 全局错误类型定义

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum LeadGenError {
    // 网络相关错误
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),

    // 审计工具（Lighthouse）相关错误
    #[error("审计命令执行失败：{0}")]
    AuditCommandError(String),
    #[error("审计命令超时（{0}秒）")]
    AuditTimeout(u64),
    #[error("审计报告格式错误：{0}")]
    MalformedReport(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type LeadResult<T> = Result<T, LeadGenError>;
