use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tf_idf_dedup::{
    loader::Dataset, vectorizer::evaluate::explain::SHARED_FEATURE_TOP_K, DetectorConfig,
    InterpretabilityReport, QueryResult, TrainedModel, WordCount,
};
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 80;

/// Check an item for near-duplicates in one column of a CSV or JSON dataset.
#[derive(Debug, Parser)]
#[command(
    version,
    about,
    after_help = "Examples:\n  tf-idf-dedup data.csv product_name \"iPhone 13 Pro\"\n  tf-idf-dedup data.jsonl description \"laptop computer\" --threshold 0.8"
)]
struct Cli {
    /// Dataset file (.csv with a header row, .json array of objects, or .jsonl / .ndjson)
    file: PathBuf,
    /// Column holding the text to compare
    column: String,
    /// Item to check for duplicates
    item: String,
    /// Similarity threshold in [0, 1] [default: 0.7]
    #[arg(long)]
    threshold: Option<f64>,
    /// Vocabulary cap [default: 5000]
    #[arg(long)]
    max_features: Option<usize>,
    /// TOML file with `threshold` / `max_features`; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    item: &'a str,
    column: &'a str,
    rows: usize,
    vocabulary: usize,
    config: DetectorConfig,
    #[serde(flatten)]
    result: &'a QueryResult,
    explanation: &'a InterpretabilityReport,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => DetectorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(max_features) = cli.max_features {
        config.max_features = max_features;
    }
    config.validate()?;

    let dataset = Dataset::load(&cli.file)
        .with_context(|| format!("loading dataset {}", cli.file.display()))?;
    let rows = dataset.column_text(&cli.column)?;
    tracing::info!(rows = rows.len(), column = %cli.column, "loaded dataset");

    let model: TrainedModel = TrainedModel::train_with(&rows, &config)?;
    let (result, report) = model.check(&cli.item, config.threshold)?;

    match cli.format {
        Format::Json => {
            let out = JsonReport {
                item: &cli.item,
                column: &cli.column,
                rows: model.len(),
                vocabulary: model.vocabulary().len(),
                config,
                result: &result,
                explanation: &report,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Text => print_text(&cli, &config, &model, &result, &report),
    }
    Ok(())
}

fn first_words(list: &[WordCount], n: usize) -> String {
    list.iter().take(n).map(|w| w.word.as_str()).collect::<Vec<_>>().join(", ")
}

fn shared_features_heading() -> String {
    format!("Top {} Most Important Shared Features:", SHARED_FEATURE_TOP_K)
}

fn rule(ch: char) {
    println!("{}", ch.to_string().repeat(RULE_WIDTH));
}

fn header(title: &str) {
    rule('=');
    println!("  {title}");
    rule('=');
}

fn print_text(
    cli: &Cli,
    config: &DetectorConfig,
    model: &TrainedModel,
    result: &QueryResult,
    report: &InterpretabilityReport,
) {
    header("DUPLICATE FINDER WITH INTERPRETABILITY");
    println!("Dataset: {}", cli.file.display());
    println!("Column: {}", cli.column);
    println!("Item to Check: {}", cli.item);
    println!("Threshold: {}", config.threshold);
    println!("Rows: {}  Vocabulary size: {}", model.len(), model.vocabulary().len());
    println!();

    header("OUTPUT");
    if result.is_unique() {
        println!("No duplicates found! This item is unique.");
        rule('=');
        return;
    }

    println!("DUPLICATE DETECTED! Found {} similar item(s)\n", result.matches.len());
    println!("Similar Items Found:");
    rule('-');
    for (i, m) in result.matches.iter().enumerate() {
        println!("\nMatch #{}:", i + 1);
        println!("  Item: {}", m.text);
        println!("  Similarity: {:.3} ({:.1}%)", m.similarity, m.similarity * 100.0);
        println!("  Index: {}", m.index);
    }

    header("INTERPRETABILITY");

    println!("\nFeature Importance Analysis");
    rule('-');
    println!("\n{}", shared_features_heading());
    println!("{:<20} {:<15} {:<15} {:<15}", "Feature", "Input TF-IDF", "Match TF-IDF", "Shared");
    rule('-');
    for f in &report.shared_features {
        println!(
            "{:<20} {:<15.4} {:<15.4} {:<15.4}",
            f.term, f.query_weight, f.match_weight, f.product
        );
    }

    if let (Some(words), Some(best)) = (&report.word_comparison, &report.best_match) {
        println!("\nWord-Level Comparison");
        rule('-');
        println!("\nInput Item: '{}'", cli.item);
        println!("  Unique words: {}", words.query_words.len());
        println!("  Words: {}", first_words(&words.query_words, 15));

        println!("\nMatched Item: '{}'", best.text);
        println!("  Unique words: {}", words.match_words.len());
        println!("  Words: {}", first_words(&words.match_words, 15));

        println!("\nCommon Words ({}):", words.common_words.len());
        if !words.common_words.is_empty() {
            let common: Vec<&str> = words.common_words.iter().take(20).map(|c| c.word.as_str()).collect();
            println!("  {}", common.join(", "));

            println!("\nCommon Word Frequencies:");
            println!("{:<20} {:<15} {:<15}", "Word", "Input Count", "Match Count");
            rule('-');
            for c in words.common_words.iter().take(15) {
                println!("{:<20} {:<15} {:<15}", c.word, c.query_count, c.match_count);
            }
        }
    }

    let stats = &report.statistics;
    println!("\nSimilarity Statistics");
    rule('-');
    println!("Mean Similarity: {:.3}", stats.mean);
    println!("Max Similarity: {:.3}", stats.max);
    println!("Min Similarity: {:.3}", stats.min);
    println!("Items Above Threshold: {}", stats.above_threshold);
    println!("Total Items: {}", stats.total);
    rule('=');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_counts_the_displayed_features() {
        assert_eq!(shared_features_heading(), "Top 10 Most Important Shared Features:");
    }
}
