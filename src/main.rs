//! rsleadgen 命令行入口
use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rsleadgen::{
    clean_url, format_business_type, validate_uk_location, ConfigManager, ContactDetails,
    WebsiteAnalyzer,
};

#[derive(Parser, Debug)]
#[command(
    name = "rsleadgen",
    about = "Analyze UK business websites and extract contact details for lead generation",
    version,
    long_about = None
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one or more websites and print a JSON result per URL
    Analyze {
        /// Website URLs (https:// is assumed when no scheme is given)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Skip Lighthouse detection and use heuristic analysis only
        #[arg(long)]
        no_lighthouse: bool,

        /// Timeout in seconds for ordinary HTTP requests
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Timeout in seconds for a single Lighthouse run
        #[arg(long, default_value_t = 60)]
        audit_timeout: u64,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Extract phone, email and postcode from text (reads stdin when TEXT is omitted)
    Extract {
        text: Option<String>,
    },
    /// Check whether a string looks like a UK location
    ValidateLocation {
        location: String,
    },
    /// Normalize a website URL
    CleanUrl {
        url: String,
    },
    /// Format a business type for display
    FormatBusinessType {
        business_type: String,
    },
}

/// 日志输出到 stderr，stdout 只输出结果
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze {
            urls,
            no_lighthouse,
            timeout,
            audit_timeout,
            pretty,
        } => {
            let config = ConfigManager::custom()
                .use_lighthouse(!no_lighthouse)
                .http_timeout(timeout)
                .audit_timeout(audit_timeout)
                .verbose(cli.verbose)
                .build();

            let analyzer = WebsiteAnalyzer::new(config)
                .await
                .context("创建网站分析器失败")?;
            info!(availability = ?analyzer.availability(), urls = urls.len(), "开始分析网站");

            for url in &urls {
                let result = analyzer.analyze(url).await;
                let json = if pretty {
                    result.to_pretty_json()
                } else {
                    result.to_compact_json()
                }
                .context("序列化分析结果失败")?;
                println!("{}", json);
            }
        }
        Command::Extract { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("读取标准输入失败")?;
                    buf
                }
            };
            let details = ContactDetails::from_text(&text);
            println!("{}", serde_json::to_string(&details)?);
        }
        Command::ValidateLocation { location } => {
            println!("{}", validate_uk_location(&location));
        }
        Command::CleanUrl { url } => {
            println!("{}", clean_url(&url));
        }
        Command::FormatBusinessType { business_type } => {
            println!("{}", format_business_type(&business_type));
        }
    }

    Ok(())
}
