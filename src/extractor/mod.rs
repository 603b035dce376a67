//! 提取模块：HTML页面信号与文本联系方式
pub mod html_extractor;
pub mod contact;

pub use self::html_extractor::HtmlExtractor;
pub use self::contact::{ContactDetails, extract_email, extract_phone_number, extract_postcode};
