//! URL处理工具
//! 补全协议、规范化URL、比较主机

use tracing::warn;
use url::Url;

/// 缺少协议时补全为 https://
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// 同一地址的 https 版本
pub fn https_variant(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None if url.starts_with("https://") => url.to_string(),
        None => format!("https://{}", url),
    }
}

/// 主机 + 显式端口（不含用户信息）
pub fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// 清理并规范化URL：补全协议、去掉片段、去掉末尾斜杠
pub fn clean_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let url = ensure_scheme(url);
    let parsed = match Url::parse(&url) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("URL清理失败：{}，错误：{}", url, e);
            return url;
        }
    };

    // url 会把空路径补成 "/"，输入本身没有路径时去掉
    let path = if has_explicit_path(&url) { parsed.path() } else { "" };
    let mut cleaned = format!("{}://{}{}", parsed.scheme(), netloc(&parsed), path);
    if let Some(query) = parsed.query() {
        cleaned.push('?');
        cleaned.push_str(query);
    }

    if cleaned.ends_with('/') {
        cleaned.pop();
    }

    cleaned
}

// 主机部分之后紧跟 "/" 才算带路径
fn has_explicit_path(url: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.find(['/', '?', '#'])
        .is_some_and(|idx| rest[idx..].starts_with('/'))
}
