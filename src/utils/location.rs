//! 英国地区校验与行业名称格式化

use once_cell::sync::Lazy;
use regex::Regex;

static UK_POSTCODE_EXACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$").unwrap()
});

static PLACE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z\s\-']+$").unwrap()
});

/// 英国主要城市
const MAJOR_UK_LOCATIONS: [&str; 30] = [
    "london", "manchester", "birmingham", "liverpool", "leeds",
    "glasgow", "edinburgh", "cardiff", "belfast", "bristol",
    "newcastle", "sheffield", "nottingham", "leicester", "coventry",
    "bradford", "brighton", "southampton", "plymouth", "reading",
    "derby", "wolverhampton", "hull", "portsmouth", "oxford",
    "cambridge", "york", "swansea", "dundee", "aberdeen",
];

/// 行业名称中需要剔除的虚词
const STOP_WORDS: [&str; 7] = ["in", "and", "the", "a", "an", "of", "for"];

/// 判断输入是否像一个英国地区（邮编 / 主要城市 / 普通地名）
pub fn validate_uk_location(location: &str) -> bool {
    if location.trim().is_empty() {
        return false;
    }

    if UK_POSTCODE_EXACT.is_match(&location.to_uppercase()) {
        return true;
    }

    if MAJOR_UK_LOCATIONS.contains(&location.to_lowercase().as_str()) {
        return true;
    }

    location.chars().count() >= 3 && PLACE_NAME.is_match(location)
}

/// 统一行业名称格式：去掉虚词，每个单词首字母大写
pub fn format_business_type(business_type: &str) -> String {
    let words: Vec<String> = business_type
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .map(capitalize)
        .collect();

    if words.is_empty() {
        return "Business".to_string();
    }

    words.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uk_location() {
        assert!(validate_uk_location("SW1A 1AA"));
        assert!(validate_uk_location("ls14ap"));
        assert!(validate_uk_location("Manchester"));
        assert!(validate_uk_location("Stoke-on-Trent"));
        assert!(validate_uk_location("King's Lynn"));

        assert!(!validate_uk_location(""));
        assert!(!validate_uk_location("   "));
        assert!(!validate_uk_location("Ab"));
        assert!(!validate_uk_location("Leeds 2"));
    }

    #[test]
    fn test_format_business_type() {
        assert_eq!(format_business_type("plumbers in leeds"), "Plumbers Leeds");
        assert_eq!(format_business_type("the BEST cafe AND bar"), "Best Cafe Bar");
        assert_eq!(format_business_type(""), "Business");
        assert_eq!(format_business_type("the and of"), "Business");
    }
}
