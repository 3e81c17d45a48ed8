// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (progress goes to stderr, the report to stdout)
// 3. Crawl the site
// 4. Print the report and exit with a proper code
//    (0 = no broken links, 1 = broken links found, 2 = error)
// =============================================================================

mod checker; // src/checker/ - link extraction and link checking
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - crawl settings
mod crawl; // src/crawl/ - the crawler itself
mod error; // src/error.rs - error kinds
mod page; // src/page.rs - Page and Link

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use crawl::{CrawlReport, PageOutcome};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // Exits with code 2 and a usage message on bad flags
    let cli = Cli::parse();

    init_logging();

    let report = crawl::crawl_website(&cli.url, cli.crawl_config()).await?;

    print_report(&report, cli.json)?;

    if report.broken_count() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// RUST_LOG overrides the default "info" level, e.g. RUST_LOG=link_crawler=debug
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &CrawlReport) {
    println!("{:<60} {:<8} {:<60}", "BROKEN LINK", "STATUS", "FOUND ON");
    println!("{}", "=".repeat(130));

    for page in &report.pages {
        if let PageOutcome::Fetched { broken, .. } = page {
            for link in broken {
                println!(
                    "{:<60} {:<8} {:<60}",
                    truncate(&link.url),
                    link.status.code(),
                    truncate(page.url())
                );
            }
        }
    }

    println!();

    let failed: Vec<_> = report
        .pages
        .iter()
        .filter_map(|page| match page {
            PageOutcome::Failed { url, error, .. } => Some((url, error)),
            PageOutcome::Fetched { .. } => None,
        })
        .collect();

    if !failed.is_empty() {
        println!("Pages that could not be crawled:");
        for (url, error) in failed {
            println!("   {} ({})", url, error);
        }
        println!();
    }

    println!("Summary for {} (max depth {}):", report.root, report.max_depth);
    println!("   Pages crawled: {}", report.fetched_count());
    println!("   Pages failed:  {}", report.failed_count());
    println!("   Broken links:  {}", report.broken_count());
}

// Keeps table columns aligned for very long URLs
fn truncate(url: &str) -> String {
    if url.chars().count() > 57 {
        let head: String = url.chars().take(57).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_url() {
        let long = format!("https://example.com/{}", "x".repeat(80));
        let shown = truncate(&long);
        assert_eq!(shown.chars().count(), 60);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate("https://example.com"), "https://example.com");
    }
}
