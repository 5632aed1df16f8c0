//! Web and PDF extraction commands.

use std::path::Path;

use anyhow::Context;
use console::style;
use serde::Serialize;

use echosift::{ExtractionResult, Pipelines};

use super::ExtractOptions;
use crate::cli::helpers::spinner;

/// Extraction output with the optional follow-up analyses.
#[derive(Serialize)]
struct ExtractReport<'a> {
    #[serde(flatten)]
    result: &'a ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<Vec<String>>,
}

/// Extract text from a web page.
pub async fn cmd_web(pipelines: &Pipelines, url: &str, options: ExtractOptions) -> anyhow::Result<()> {
    let pb = spinner(format!("Fetching {}...", url));
    let result = pipelines.extract_from_web(url, options.preprocess).await;
    pb.finish_and_clear();

    let result = result.with_context(|| format!("Failed to extract {}", url))?;
    report(pipelines, &result, options).await
}

/// Extract text from a PDF file.
pub async fn cmd_pdf(pipelines: &Pipelines, file: &Path, options: ExtractOptions) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());

    let pb = spinner(format!("Extracting text from {}...", name));
    let result = pipelines
        .extract_from_pdf(&bytes, &name, options.preprocess)
        .await;
    pb.finish_and_clear();

    let result = result.with_context(|| format!("Failed to extract {}", name))?;
    report(pipelines, &result, options).await
}

/// List the images on a web page.
pub async fn cmd_images(pipelines: &Pipelines, url: &str, limit: usize) -> anyhow::Result<()> {
    let images = pipelines
        .extract_images(url)
        .await
        .with_context(|| format!("Failed to extract images from {}", url))?;

    if images.is_empty() {
        println!("{} No images found on {}", style("→").cyan(), url);
        return Ok(());
    }

    let shown = if limit == 0 { images.len() } else { limit.min(images.len()) };
    println!(
        "{} {} images on {} (showing {})",
        style("✓").green(),
        images.len(),
        url,
        shown
    );
    for image in images.iter().take(shown) {
        println!("  {}", image);
    }
    Ok(())
}

async fn report(
    pipelines: &Pipelines,
    result: &ExtractionResult,
    options: ExtractOptions,
) -> anyhow::Result<()> {
    if result.is_empty() {
        eprintln!(
            "{} No text could be extracted from {}",
            style("!").yellow(),
            result.source
        );
    }

    let summary = if options.summarize && !result.is_empty() {
        let pb = spinner("Generating summary...");
        let summary = pipelines.summarize_extraction(result).await;
        pb.finish_and_clear();
        Some(summary.context("Failed to summarize")?)
    } else {
        None
    };

    let keywords = if options.keywords && !result.is_empty() {
        Some(
            pipelines
                .extract_keywords(&result.text)
                .await
                .context("Failed to extract keywords")?,
        )
    } else {
        None
    };

    if options.json {
        let report = ExtractReport {
            result,
            summary,
            keywords,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} Extracted {} chars from {} ({})",
        style("✓").green(),
        result.text.len(),
        result.source,
        result.method
    );
    println!("\n{}", result.text);

    if let Some(ref pre) = result.preprocessed {
        println!("\n{}", style("Preprocessed").bold());
        println!("  {:<12} {}", "sentences", pre.sentences.len());
        println!("  {:<12} {}", "words", pre.words.len());
        println!("  {:<12} {}", "chunks", pre.chunks.len());
        if !pre.chunks.is_empty() {
            let preview: Vec<&str> = pre.chunks.iter().take(10).map(String::as_str).collect();
            println!("  {}", style(preview.join(", ")).dim());
        }
    }

    if let Some(summary) = summary {
        println!("\n{}\n{}", style("Summary").bold(), summary);
    }
    if let Some(keywords) = keywords {
        println!("\n{}\n{}", style("Keywords").bold(), keywords.join(", "));
    }
    Ok(())
}
