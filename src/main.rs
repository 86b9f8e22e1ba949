//! # chatsense CLI
//!
//! Command-line interface for the chatsense library.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatsense::ChatsenseError;
use chatsense::cli::{Args, ChatArgs, CleanArgs, Command};
use chatsense::config::{CsvOptions, PipelineConfig};
use chatsense::core::{FilterConfig, apply_filters, read_csv_file, to_table};
use chatsense::format::{OutputFormat, write_to_format};
use chatsense::parser::ChatParser;
use chatsense::parsing::TelegramHtmlParser;
use chatsense::preprocess::{
    DictionaryLemmatizer, GazetteerNameExtractor, PreprocessingPipeline, UnknownWords,
};
use chatsense::progress::ProgressCallback;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatsenseError> {
    match &args.command {
        Command::Chat(chat) => run_chat(args, chat),
        Command::Clean(clean) => run_clean(args, clean),
        Command::Text { text } => {
            let pipeline = build_pipeline(args, PipelineConfig::default())?;
            println!("{}", pipeline.preprocess_text(text)?);
            Ok(())
        }
    }
}

/// Builds the pipeline with the built-in resources plus any `--lemma-dict`
/// files.
fn build_pipeline(
    args: &Args,
    config: PipelineConfig,
) -> Result<PreprocessingPipeline, ChatsenseError> {
    let mut lemmatizer = DictionaryLemmatizer::builtin();
    for path in &args.lemma_dicts {
        lemmatizer = lemmatizer.with_dictionary(path)?;
    }
    if args.keep_unknown {
        lemmatizer = lemmatizer.with_unknown_words(UnknownWords::Keep);
    }

    Ok(PreprocessingPipeline::with_resources(
        config,
        Arc::new(GazetteerNameExtractor::builtin()),
        Arc::new(lemmatizer),
    ))
}

fn run_chat(args: &Args, chat: &ChatArgs) -> Result<(), ChatsenseError> {
    let total_start = Instant::now();
    let format: OutputFormat = chat.format.into();
    let output_path = adjust_output_extension(&chat.output, "chat.csv", format);

    println!("📦 chatsense v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", chat.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", format);

    let mut filter_config = FilterConfig::new();
    if let Some(ref after) = chat.after {
        filter_config = filter_config.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = chat.before {
        filter_config = filter_config.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = chat.from {
        filter_config = filter_config.with_sender(from.clone());
        println!("👤 From:    {}", from);
    }
    println!();

    let parser = TelegramHtmlParser::new();
    println!("⏳ Parsing {}...", parser.name());
    let parse_start = Instant::now();
    let records = parser.parse(&chat.input)?;
    let original_count = records.len();
    println!(
        "   Found {} messages ({:.2}s)",
        original_count,
        parse_start.elapsed().as_secs_f64()
    );

    let records = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = apply_filters(records, &filter_config);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        records
    };

    let mut table = to_table(&records);
    println!("📋 Assembled {} rows", table.len());

    if chat.clean {
        println!("🧹 Normalizing messages...");
        let pipeline = build_pipeline(args, PipelineConfig::default())?;
        table = pipeline.preprocess_dataset_with_progress(&table, &stdout_progress())?;
        println!("   {} rows after normalization", table.len());
    }

    write_table(&table, &output_path, format, CsvOptions::default())?;

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());
    println!();
    println!("📊 Summary:");
    println!("   Parsed:    {} messages", original_count);
    if filter_config.is_active() {
        println!("   Filtered:  {} messages", records.len());
    }
    println!("   Written:   {} rows", table.len());
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn run_clean(args: &Args, clean: &CleanArgs) -> Result<(), ChatsenseError> {
    let total_start = Instant::now();
    let format: OutputFormat = clean.format.into();
    let output_path = adjust_output_extension(&clean.output, "cleaned.csv", format);
    let csv_options = clean.csv_options();

    println!("📦 chatsense v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", clean.input.display());
    println!("🏷️  Column:  {}", clean.column);
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", format);
    println!();

    println!("⏳ Reading CSV...");
    let table = read_csv_file(&clean.input, csv_options)?;
    println!("   Found {} rows", table.len());

    println!("🧹 Normalizing column '{}'...", clean.column);
    let pipeline = build_pipeline(args, PipelineConfig::new().with_target_column(&clean.column))?;
    let cleaned = pipeline.preprocess_dataset_with_progress(&table, &stdout_progress())?;

    write_table(&cleaned, &output_path, format, csv_options)?;

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());
    println!();
    println!("📊 Summary:");
    println!("   Input:     {} rows", table.len());
    println!("   Output:    {} rows", cleaned.len());
    println!("   Dropped:   {} empty rows", table.len() - cleaned.len());
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn write_table(
    table: &chatsense::core::Table,
    path: &Path,
    format: OutputFormat,
    csv_options: CsvOptions,
) -> Result<(), ChatsenseError> {
    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    write_to_format(table, path, format, csv_options)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());
    Ok(())
}

fn stdout_progress() -> ProgressCallback {
    Arc::new(|progress| {
        println!(
            "   [{}/{}] {} ({} rows)",
            progress.stages_completed, progress.total_stages, progress.stage, progress.rows_processed
        );
    })
}

/// Swaps the extension of the default output path to match the format.
fn adjust_output_extension(output: &Path, default: &str, format: OutputFormat) -> PathBuf {
    if output != Path::new(default) {
        return output.to_path_buf();
    }
    output.with_extension(format.extension())
}
