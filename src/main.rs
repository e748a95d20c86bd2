// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quarry::build::{self, LoadReport, NOT_AVAILABLE};
use quarry::persist::{self, PersistFormat};
use quarry::{EngineConfig, SearchEngine, SearchResponse, Statistics, PREVIEW_WORDS};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

/// Authors shown per search result.
const AUTHORS_SHOWN: usize = 3;

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr, filtered by `QUARRY_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("QUARRY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli
        .engine
        .resolve()
        .context("failed to load engine configuration")?;

    match cli.command {
        Commands::Index {
            input,
            output,
            json,
        } => run_index(config, &input, &output, json),
        Commands::Search {
            input,
            index,
            json,
            metadata,
            query,
            limit,
            open,
        } => {
            let mut config = config;
            if let Some(limit) = limit {
                config.top_k = limit;
                config.validate().context("invalid --limit")?;
            }
            let format = if json {
                PersistFormat::Json
            } else {
                PersistFormat::Lines
            };
            let search = SearchArgs {
                input: &input,
                restore_from: index.as_deref().map(|dir| (dir, format)),
                metadata: metadata.as_deref(),
                open,
            };
            run_search(config, search, &query)
        }
        Commands::Stats { input } => run_stats(config, &input),
        Commands::Inspect { file } => run_inspect(&config, &file),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INDEX
// ═══════════════════════════════════════════════════════════════════════════

fn run_index(config: EngineConfig, input: &Path, output: &Path, json: bool) -> Result<()> {
    let engine = build_engine(config, input)?;

    engine
        .save(output, PersistFormat::Lines)
        .context("failed to write index files")?;
    let mut written = vec![
        output.join(&engine.config().word_index_file),
        output.join(&engine.config().author_index_file),
    ];
    if json {
        engine
            .save(output, PersistFormat::Json)
            .context("failed to write JSON snapshot")?;
        written.push(output.join(&engine.config().snapshot_file));
    }

    for path in &written {
        eprintln!("  ✓ {}", path.display());
    }
    eprintln!();
    eprintln!("✅ Index complete");
    eprintln!(
        "   {} articles │ {} unique words │ {} unique authors",
        engine.document_count(),
        engine.word_index().unique_key_count(),
        engine.author_index().unique_key_count()
    );
    Ok(())
}

fn build_engine(config: EngineConfig, input: &Path) -> Result<SearchEngine> {
    let mut engine = SearchEngine::from_config(config)?;
    let documents = load_documents(input)?;
    engine.index_corpus(documents);
    Ok(engine)
}

fn load_documents(input: &Path) -> Result<Vec<quarry::Document>> {
    let (documents, report) = build::load_corpus_with_progress(input)
        .with_context(|| format!("failed to read corpus directory {}", input.display()))?;
    report_skipped(&report);
    if documents.is_empty() {
        eprintln!("⚠️  No articles loaded from {}", input.display());
    }
    Ok(documents)
}

fn report_skipped(report: &LoadReport) {
    if report.skipped.is_empty() {
        return;
    }
    eprintln!(
        "⚠️  Skipped {} of {} files (set QUARRY_LOG=warn for details)",
        report.skipped.len(),
        report.files
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

struct SearchArgs<'a> {
    input: &'a Path,
    restore_from: Option<(&'a Path, PersistFormat)>,
    metadata: Option<&'a Path>,
    open: Option<usize>,
}

fn run_search(config: EngineConfig, args: SearchArgs<'_>, query: &str) -> Result<()> {
    let SearchArgs {
        input,
        restore_from,
        metadata,
        open,
    } = args;

    let mut engine = match restore_from {
        Some((dir, format)) => {
            let mut engine = SearchEngine::from_config(config)?;
            engine.attach_documents(load_documents(input)?);
            let report = engine
                .restore(dir, format)
                .with_context(|| format!("failed to restore indexes from {}", dir.display()))?;
            for path in &report.missing {
                eprintln!("⚠️  Missing index file {}", path.display());
            }
            engine
        }
        None => build_engine(config, input)?,
    };

    if let Some(path) = metadata {
        let table = build::load_metadata(path).context("failed to read article metadata")?;
        engine.attach_metadata(table);
    }

    let response = engine.search(query)?;
    print_response(&engine, &response);
    if let Some(rank) = open {
        print_preview(&engine, &response, rank);
    }
    Ok(())
}

fn print_response(engine: &SearchEngine, response: &SearchResponse) {
    section_top("QUERY");
    row(&format!(" {}", response.expr));
    for warning_msg in &response.warnings {
        row(&format!(" {}", warning(&warning_msg.to_string())));
    }
    if !response.missing_terms.is_empty() {
        row(&format!(
            " {}",
            themed(Role::Muted, &[DIM], &format!("not indexed: {}", response.missing_terms.join(", ")))
        ));
    }
    if let Some(author) = &response.missing_author {
        row(&format!(
            " {}",
            themed(Role::Muted, &[DIM], &format!("unknown author: {} (filter ignored)", author))
        ));
    }

    section_mid(&format!(
        "RESULTS ({} of {})",
        response.results.len(),
        response.candidates
    ));
    if response.results.is_empty() {
        row(" no matching articles");
    }
    for (i, result) in response.results.iter().enumerate() {
        let (title, authors) = match engine.document(result.document_id.as_str()) {
            Some(doc) => (doc.title.as_str(), author_list(&doc.authors, AUTHORS_SHOWN)),
            None => ("(article not loaded)", String::new()),
        };
        row(&format!(
            " {} {}  {}",
            rank_label(i + 1),
            score_value(result.score),
            themed(Role::Title, &[BOLD], &truncate(title, BOX_WIDTH - 18))
        ));
        if !authors.is_empty() {
            row(&format!("                {}", truncate(&authors, BOX_WIDTH - 17)));
        }
        if let Some(meta) = engine.metadata(result.document_id.as_str()) {
            row(&format!(
                "                {}  {}",
                themed(Role::Detail, &[], meta.published.as_deref().unwrap_or(NOT_AVAILABLE)),
                truncate(meta.publication.as_deref().unwrap_or(NOT_AVAILABLE), BOX_WIDTH - 32)
            ));
        }
        row(&format!(
            "                {}",
            themed(Role::Muted, &[], result.document_id.as_str())
        ));
    }
    section_bot();
}

/// Opening words of the `rank`-th result (1-based), wrapped to the box.
fn print_preview(engine: &SearchEngine, response: &SearchResponse, rank: usize) {
    let Some(result) = rank.checked_sub(1).and_then(|i| response.results.get(i)) else {
        eprintln!(
            "⚠️  No result #{} to open ({} shown)",
            rank,
            response.results.len()
        );
        return;
    };
    let Some(doc) = engine.document(result.document_id.as_str()) else {
        eprintln!("⚠️  Article {} is not loaded", result.document_id);
        return;
    };

    section_top(&format!("ARTICLE #{}", rank));
    row(&format!(" {}", themed(Role::Title, &[BOLD], &truncate(&doc.title, BOX_WIDTH - 4))));
    section_mid("TEXT");
    for line in wrap(&doc.preview(PREVIEW_WORDS), BOX_WIDTH - 4) {
        row(&format!(" {}", line));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════

fn run_stats(config: EngineConfig, input: &Path) -> Result<()> {
    let engine = build_engine(config, input)?;
    print_statistics(&engine.statistics());
    Ok(())
}

fn stat_row(label: &str, value: usize) {
    row(&format!(
        " {:<34}{}",
        label,
        themed(Role::Count, &[BOLD], &pad_left(&value.to_string(), 12))
    ));
}

fn print_statistics(stats: &Statistics) {
    banner("CORPUS STATISTICS");

    section_top("INDEX");
    stat_row("Articles indexed", stats.articles);
    stat_row("Words indexed", stats.words_indexed);
    stat_row("Unique words", stats.unique_words);
    stat_row("Unique authors", stats.unique_authors);
    section_mid("PER ARTICLE");
    stat_row("Indexed words (avg)", stats.avg_words_per_article);
    stat_row("Stop words (avg)", stats.avg_stop_words_per_article);

    section_mid(&format!("TOP {} WORDS", stats.top_words.len()));
    for (i, word) in stats.top_words.iter().enumerate() {
        row(&format!(
            " {:>3}. {:<30}{}",
            i + 1,
            truncate(&word.word, 30),
            pad_left(&word.count.to_string(), 12)
        ));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct FileSummary {
    keys: usize,
    postings: usize,
    longest: Option<(String, usize)>,
}

impl FileSummary {
    fn add(&mut self, key: &str, postings: usize) {
        self.keys += 1;
        self.postings += postings;
        if self.longest.as_ref().is_none_or(|(_, len)| postings > *len) {
            self.longest = Some((key.to_string(), postings));
        }
    }

    fn print(&self) {
        stat_row("Keys", self.keys);
        stat_row("Postings", self.postings);
        if let Some((key, len)) = &self.longest {
            row(&format!(
                " {:<34}{} ({})",
                "Longest list",
                themed(Role::Detail, &[], &truncate(key, 24)),
                len
            ));
        }
    }
}

fn run_inspect(config: &EngineConfig, file: &Path) -> Result<()> {
    let size = std::fs::metadata(file)
        .with_context(|| format!("cannot read {}", file.display()))?
        .len();

    section_top("FILE");
    row(&format!(" {}", file.display()));
    row(&format!(" {}", format_size(size)));

    if file.extension().is_some_and(|ext| ext == "json") {
        let snapshot = persist::load_snapshot(file)?
            .with_context(|| format!("{} disappeared while reading", file.display()))?;
        for (label, entries) in [("WORDS", &snapshot.words), ("AUTHORS", &snapshot.authors)] {
            let mut summary = FileSummary::default();
            for entry in entries {
                summary.add(&entry.key, entry.postings.len());
            }
            section_mid(label);
            summary.print();
        }
    } else {
        let reader = BufReader::new(File::open(file).with_context(|| format!("cannot open {}", file.display()))?);
        let entries = persist::parse_entries(reader, config.doc_id_len)
            .with_context(|| format!("cannot read {}", file.display()))?;
        let mut summary = FileSummary::default();
        for (key, postings) in &entries {
            summary.add(key, postings.len());
        }
        section_mid("ENTRIES");
        summary.print();
    }
    section_bot();
    Ok(())
}
