//! 启发式分析：Lighthouse 不可用时，根据页面内容和响应头粗略估算四项评分

use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::debug;

use crate::error::LeadResult;
use crate::extractor::HtmlExtractor;
use crate::model::Findings;

/// 超过该字节数视为页面过大
const LARGE_BODY_BYTES: usize = 1_000_000;

/// 需要检查的安全响应头
const SECURITY_HEADERS: [&str; 3] = [
    "Strict-Transport-Security",
    "Content-Security-Policy",
    "X-Content-Type-Options",
];

/// 标题缺失：没有 `<title>` 标记，或存在空的 `<title></title>`
fn title_marker_missing(lowered_html: &str) -> bool {
    !lowered_html.contains("<title>") || lowered_html.contains("<title></title>")
}

/// 页面中出现 meta description 标记（`meta name="description"` 或 `meta content=`）
fn has_meta_description_marker(lowered_html: &str) -> bool {
    lowered_html.contains("meta name=\"description\"") || lowered_html.contains("meta content=")
}

/// 一次抓取得到的页面快照
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl PageSnapshot {
    pub fn new(headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self { headers, body: body.into() }
    }

    /// 缺失的安全响应头（按固定顺序）
    pub fn missing_security_headers(&self) -> Vec<&'static str> {
        SECURITY_HEADERS
            .iter()
            .copied()
            .filter(|name| !self.headers.contains_key(*name))
            .collect()
    }
}

/// 启发式分析器
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    /// 抓取页面并估算评分；抓取失败只记录一条问题，评分保持不变
    pub async fn analyze(client: &Client, url: &str, findings: &mut Findings) {
        match Self::fetch(client, url).await {
            Ok(page) => Self::apply(&page, findings),
            Err(e) => {
                debug!(url = url, "启发式分析抓取失败：{}", e);
                findings.add_issue(format!("Error during basic analysis: {}", e));
            }
        }
    }

    async fn fetch(client: &Client, url: &str) -> LeadResult<PageSnapshot> {
        let response = client.get(url).send().await?;
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(PageSnapshot::new(headers, body.to_vec()))
    }

    /// 根据页面快照写入四项评分
    pub fn apply(page: &PageSnapshot, findings: &mut Findings) {
        // 性能
        if page.body.len() > LARGE_BODY_BYTES {
            findings.performance_score = 50;
            findings.add_issue("Large page size");
        } else {
            findings.performance_score = 70;
        }

        // SEO：按页面文本标记判断，每项失败都把分数设为 40（不叠加）
        let text = String::from_utf8_lossy(&page.body);
        let lowered = text.to_lowercase();
        findings.seo_score = 60;
        if title_marker_missing(&lowered) {
            findings.seo_score = 40;
            findings.add_issue("Missing page title");
        }
        if !has_meta_description_marker(&lowered) {
            findings.seo_score = 40;
            findings.add_issue("Missing meta description");
        }

        // 可访问性
        let html = HtmlExtractor::new().extract(&text);
        debug!(title = ?html.get_title(), meta_tags = html.get_meta_tags().len(), images = html.img_count(), "页面解析完成");
        if html.images_lack_alt() {
            findings.accessibility_score = 40;
            findings.add_issue("Images may be missing alt text");
        } else {
            findings.accessibility_score = 50;
        }

        // 最佳实践
        let missing = page.missing_security_headers();
        if missing.is_empty() {
            findings.best_practices_score = 60;
        } else {
            findings.best_practices_score = 40;
            findings.add_issue(format!("Missing security headers: {}", missing.join(", ")));
        }

        debug!(scores = ?findings.scores(), "启发式评分完成");
    }
}
