//! 工具模块：URL处理、地区校验等通用能力
pub mod url_helper;
pub mod location;

pub use self::url_helper::{clean_url, ensure_scheme, https_variant, netloc};
pub use self::location::{format_business_type, validate_uk_location};
