//! 分析模块：基础检测、启发式分析、优先级计算与网站分析器
pub mod basic;
pub mod fallback;
pub mod priority;
pub mod website_analyzer;

pub use self::basic::BasicProber;
pub use self::fallback::{HeuristicAnalyzer, PageSnapshot};
pub use self::priority::PriorityCalculator;
pub use self::website_analyzer::WebsiteAnalyzer;
