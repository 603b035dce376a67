//! 基础检测：SSL、状态码、跨域跳转、移动端 viewport、页面大小

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{LeadGenError, LeadResult};
use crate::model::Findings;
use crate::utils::{https_variant, netloc};

/// 页面大小告警阈值（KB）
const LARGE_PAGE_KB: f64 = 5000.0;

/// 网络请求失败时的问题前缀，优先级计算依赖该文本
pub const ACCESS_ERROR_MARKER: &str = "Error accessing website";

/// 基础检测器
pub struct BasicProber;

impl BasicProber {
    /// 执行基础检测，任何错误都转换为问题描述
    pub async fn probe(client: &Client, url: &str, findings: &mut Findings) {
        Self::probe_with_https_variant(client, url, &https_variant(url), findings).await;
    }

    async fn probe_with_https_variant(client: &Client, url: &str, https_url: &str, findings: &mut Findings) {
        if let Err(e) = Self::try_probe(client, url, https_url, findings).await {
            debug!(url = url, "基础检测失败：{}", e);
            findings.add_issue(Self::error_issue(&e));
        }
    }

    /// 网络错误归为无法访问，其他错误归为检测失败
    fn error_issue(error: &LeadGenError) -> String {
        match error {
            LeadGenError::HttpError(e) => format!("{}: {}", ACCESS_ERROR_MARKER, e),
            other => format!("Error during basic analysis: {}", other),
        }
    }

    async fn try_probe(
        client: &Client,
        url: &str,
        https_url: &str,
        findings: &mut Findings,
    ) -> LeadResult<()> {
        // 1. SSL
        findings.has_ssl = url.starts_with("https://");
        if !findings.has_ssl {
            findings.add_issue("Website does not use SSL (https)");
            if Self::https_available(client, https_url).await {
                findings.add_issue("HTTPS is available but not used by default");
            }
        }

        // 2. 主请求
        let response = client.get(url).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            findings.add_issue(format!("Website returns HTTP status {}", status.as_u16()));
            return Ok(());
        }

        // 3. 跳转到其他域名
        let requested = Url::parse(url)?;
        let final_url = response.url().clone();
        if netloc(&final_url) != netloc(&requested) {
            findings.add_issue(format!("Website redirects to {}", final_url));
        }

        let body = response.bytes().await?;

        // 4. 移动端 viewport
        if String::from_utf8_lossy(&body).to_lowercase().contains("viewport") {
            findings.has_mobile_viewport = true;
        } else {
            findings.add_issue("No mobile viewport meta tag found");
        }

        // 5. 页面大小
        let page_size_kb = body.len() as f64 / 1024.0;
        if page_size_kb > LARGE_PAGE_KB {
            findings.add_issue(format!("Page size is large ({:.1} KB)", page_size_kb));
        }

        debug!(url = url, status = status.as_u16(), size_kb = page_size_kb, "基础检测完成");
        Ok(())
    }

    /// 尝试访问 https 版本，失败一律视为不可用
    async fn https_available(client: &Client, https_url: &str) -> bool {
        match client.head(https_url).send().await {
            Ok(response) => response.status().as_u16() < 400,
            Err(e) => {
                debug!(url = https_url, "https 探测失败：{}", e);
                false
            }
        }
    }
}
