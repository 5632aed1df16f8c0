//! Summary, keyword, and question answering commands over plain text.

use std::path::Path;

use anyhow::Context;
use console::style;

use echosift::nlp::QaError;
use echosift::Pipelines;

use crate::cli::helpers::{read_text, spinner};

/// Summarize text from a file or stdin.
pub async fn cmd_summarize(
    pipelines: &Pipelines,
    file: Option<&Path>,
    preprocess: bool,
) -> anyhow::Result<()> {
    let text = read_text(file).await?;

    let pb = spinner("Generating summary...");
    let summary = pipelines.summarize(&text, preprocess).await;
    pb.finish_and_clear();

    println!("{}", summary.context("Failed to summarize")?);
    Ok(())
}

/// Extract keywords from a file or stdin.
pub async fn cmd_keywords(pipelines: &Pipelines, file: Option<&Path>) -> anyhow::Result<()> {
    let text = read_text(file).await?;
    let keywords = pipelines
        .extract_keywords(&text)
        .await
        .context("Failed to extract keywords")?;

    for keyword in keywords {
        println!("{}", keyword);
    }
    Ok(())
}

/// Answer a question against a context.
pub async fn cmd_ask(
    pipelines: &Pipelines,
    question: &str,
    context_file: Option<&Path>,
    context: Option<String>,
) -> anyhow::Result<()> {
    let context = match context {
        Some(text) => text,
        None => read_text(context_file).await?,
    };

    let pb = spinner("Finding answer...");
    let answer = pipelines.answer(&context, question).await;
    pb.finish_and_clear();

    match answer {
        Ok(answer) => {
            println!("{} Answer: {}", style("✓").green(), answer);
            Ok(())
        }
        Err(QaError::MissingInput) => {
            eprintln!("{} {}", style("!").yellow(), QaError::MissingInput);
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to find answer")),
    }
}
