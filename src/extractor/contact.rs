//! 联系方式提取工具
//! 从任意文本中提取英国电话号码、邮箱地址与邮编，按模式顺序首个命中即返回

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 英国电话号码模式（顺序即优先级）
static UK_PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // +44 7700 900000 / 01632 960 960
        r"(?:(?:\+44\s?[0-9]{4}|\(?0[0-9]{4}\)?)\s?[0-9]{3}\s?[0-9]{3})",
        // +44 121 234 5678
        r"(?:(?:\+44\s?[0-9]{3}|\(?0[0-9]{3}\)?)\s?[0-9]{3}\s?[0-9]{4})",
        // +44 20 1234 5678
        r"(?:(?:\+44\s?[0-9]{2}|\(?0[0-9]{2}\)?)\s?[0-9]{4}\s?[0-9]{4})",
        // +44 7123 456789
        r"(?:\+44\s?7[0-9]{3}|(?:^|\s)07[0-9]{3})\s?[0-9]{6}",
        // +447123456789
        r"(?:\+44\s?7[0-9]{9})",
        // 01234 567890
        r"\b[0-9]{5}\s?[0-9]{5,6}\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap()
});

static UK_POSTCODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}").unwrap()
});

/// 提取第一个英国电话号码
pub fn extract_phone_number(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    UK_PHONE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().trim().to_string())
}

/// 提取第一个邮箱地址
pub fn extract_email(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    EMAIL_REGEX.find(text).map(|m| m.as_str().to_string())
}

/// 提取第一个英国邮编，统一为大写并补齐 outward/inward 之间的空格
pub fn extract_postcode(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let upper = text.to_uppercase();
    let postcode = UK_POSTCODE_REGEX.find(&upper)?.as_str();

    if postcode.contains(' ') {
        return Some(postcode.to_string());
    }

    // inward 部分固定为最后三个字符
    let (outward, inward) = postcode.split_at(postcode.len() - 3);
    Some(format!("{} {}", outward, inward))
}

/// 一段文本中的联系方式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub postcode: Option<String>,
}

impl ContactDetails {
    pub fn from_text(text: &str) -> Self {
        Self {
            phone: extract_phone_number(text),
            email: extract_email(text),
            postcode: extract_postcode(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.postcode.is_none()
    }
}
