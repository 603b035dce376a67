//! Lighthouse 报告视图
//! 报告来自外部进程，所有字段都可能缺失；访问器对缺失/null 返回 Ok(None)，
//! 只有字段存在但类型错误时才返回错误

use serde_json::{Map, Value};

use crate::error::{LeadGenError, LeadResult};

/// Lighthouse JSON 报告
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    raw: Value,
}

impl AuditReport {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    pub fn from_slice(data: &[u8]) -> LeadResult<Self> {
        Ok(Self::from_value(serde_json::from_slice(data)?))
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// 分类得分（0.0 - 1.0）
    pub fn category_score(&self, category: &str) -> LeadResult<Option<f64>> {
        let Some(entry) = self.section("categories")?.and_then(|c| c.get(category)) else {
            return Ok(None);
        };
        let entry = as_object(entry, &format!("categories.{}", category))?;
        optional_number(entry.get("score"), &format!("categories.{}.score", category))
    }

    /// 审计项，不存在时返回 None
    pub fn audit(&self, audit_id: &str) -> LeadResult<Option<AuditEntry<'_>>> {
        let Some(entry) = self.section("audits")?.and_then(|a| a.get(audit_id)) else {
            return Ok(None);
        };
        let entry = as_object(entry, &format!("audits.{}", audit_id))?;
        Ok(Some(AuditEntry { id: audit_id.to_string(), entry }))
    }

    fn section(&self, name: &str) -> LeadResult<Option<&Map<String, Value>>> {
        let root = as_object(&self.raw, "report")?;
        match root.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => as_object(value, name).map(Some),
        }
    }
}

/// 单个审计项
#[derive(Debug, Clone)]
pub struct AuditEntry<'a> {
    id: String,
    entry: &'a Map<String, Value>,
}

impl AuditEntry<'_> {
    pub fn score(&self) -> LeadResult<Option<f64>> {
        optional_number(self.entry.get("score"), &format!("audits.{}.score", self.id))
    }

    pub fn display_value(&self) -> LeadResult<Option<String>> {
        match self.entry.get("displayValue") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(type_error(&format!("audits.{}.displayValue", self.id), "string", other)),
        }
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> LeadResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| type_error(path, "object", value))
}

fn optional_number(value: Option<&Value>, path: &str) -> LeadResult<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(type_error(path, "number", other)),
    }
}

fn type_error(path: &str, expected: &str, found: &Value) -> LeadGenError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    LeadGenError::MalformedReport(format!("{} 应为 {}，实际为 {}", path, expected, found))
}
