//! Diagnostics: URL safety checks and tool availability.

use std::time::Duration;

use anyhow::Context;
use console::style;

use echosift::http_client::HttpClient;
use echosift::llm::LlmClient;
use echosift::ocr::{check_tools, OcrBackend, OcrConfig, TesseractBackend};
use echosift::security::{check_redirect_count, detect_rate_limit};
use echosift::Config;

use super::helpers::truncate;

/// Fetch a URL and report its redirect chain and rate-limit status.
pub async fn cmd_check(config: &Config, url: &str) -> anyhow::Result<()> {
    let mut builder = HttpClient::builder(Duration::from_secs(config.scraper.request_timeout))
        .max_redirects(config.scraper.max_redirects);
    if let Some(ref ua) = config.scraper.user_agent {
        builder = builder.user_agent(ua);
    }
    let client = builder.build()?;

    let response = client
        .get(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    println!("\n{}", style("Redirect chain").bold());
    for hop in &response.history {
        println!(
            "  {} {}",
            style(hop.status.as_u16()).yellow(),
            truncate(hop.url.as_str(), 70)
        );
    }
    println!(
        "  {} {}",
        style(response.status.as_u16()).cyan(),
        truncate(response.url.as_str(), 70)
    );

    let verdict = check_redirect_count(response.redirect_count(), config.scraper.max_safe_redirects);
    if verdict.safe {
        println!("\n{} {}", style("✓").green(), verdict.message);
    } else {
        println!("\n{} Security Warning: {}", style("✗").red(), verdict.message);
    }

    if detect_rate_limit(response.status.as_u16()) {
        println!(
            "{} Rate limited or blocked (HTTP {})",
            style("✗").red(),
            response.status.as_u16()
        );
    }
    Ok(())
}

/// Check external tool and LLM availability.
pub async fn cmd_tools(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Tool Status").bold());
    println!("{}", "-".repeat(50));

    println!("\n{}", style("PDF Tools:").cyan());
    let mut all_found = true;
    for (tool, available) in check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    let tesseract = TesseractBackend::with_config(OcrConfig {
        language: config.pdf.tesseract_lang.clone(),
    });
    if !tesseract.is_available() {
        println!("                  {}", style(tesseract.availability_hint()).dim());
    }

    println!("\n{}", style("LLM:").cyan());
    let llm = LlmClient::new(config.llm.clone())?;
    let llm_status = if !config.llm.enabled {
        style("○ disabled".to_string()).yellow()
    } else if !llm.is_available().await {
        style(format!("✗ unreachable at {}", config.llm.endpoint)).red()
    } else {
        match llm.ensure_model().await {
            Ok(()) => style(format!("✓ {}", config.llm.model)).green(),
            Err(e) => style(format!("✗ {}", e)).red(),
        }
    };
    println!("  {:<15} {}", "Ollama", llm_status);

    println!("\n{}", style("Tokenizer:").cyan());
    match config.tokenizer_path() {
        Some(path) if path.exists() => {
            println!("  {:<15} {}", "tokenizer", style(path.display()).green())
        }
        Some(path) => println!(
            "  {:<15} {}",
            "tokenizer",
            style(format!("✗ missing {}", path.display())).red()
        ),
        None => println!(
            "  {:<15} {}",
            "tokenizer",
            style("○ whitespace tokens (no tokenizer_path)").yellow()
        ),
    }

    if !all_found {
        println!(
            "\n{} Scanned PDFs need poppler-utils and tesseract-ocr installed.",
            style("!").yellow()
        );
    }
    Ok(())
}
