use anyhow::{Context, Result};
use clap::Parser;

use sift::{render, FileSource, IndexLoader, InvertedIndex, ParsedQuery, PostRecord};

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start async runtime")?;

    match cli.command {
        Commands::Search {
            file,
            query,
            limit,
            ranked,
        } => runtime.block_on(run_search(&file, &query, limit, ranked)),
        Commands::Inspect { file } => run_inspect(&file),
    }
}

/// Query an index file through the same loader/engine/render path the
/// page uses. A missing or malformed index is an empty corpus here too.
async fn run_search(file: &str, raw_query: &str, limit: usize, ranked: bool) -> Result<()> {
    let loader = IndexLoader::new(FileSource::new(file));
    let corpus = loader.load().await;

    let query = ParsedQuery::parse(raw_query);
    let mut hits = if ranked {
        InvertedIndex::build(&corpus).search(&query)
    } else {
        sift::search(&query, &corpus)
    };
    hits.truncate(limit);

    let mut out = display::TermRenderer::new(raw_query);
    render(&query, &hits, &corpus, &mut out);
    Ok(())
}

/// Show what the generator actually emitted. Unlike `search`, this does
/// not paper over a broken index; a malformed file is an error here.
fn run_inspect(file: &str) -> Result<()> {
    let body =
        std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file))?;
    let corpus: Vec<PostRecord> =
        serde_json::from_str(&body).context("index is not a JSON array of post records")?;
    let index = InvertedIndex::build(&corpus);

    let with_author = corpus.iter().filter(|r| r.author.is_some()).count();
    let with_category = corpus.iter().filter(|r| r.category.is_some()).count();
    let tagged = corpus.iter().filter(|r| !r.tags.is_empty()).count();
    let first = corpus.iter().map(|r| r.date.as_str()).min().unwrap_or("-");
    let last = corpus.iter().map(|r| r.date.as_str()).max().unwrap_or("-");

    println!("{}", display::box_top(file));
    println!("{}", display::box_row("records", &corpus.len().to_string()));
    println!("{}", display::box_row("size", &format!("{} bytes", body.len())));
    println!(
        "{}",
        display::box_row("dates", &format!("{} .. {}", first, last))
    );
    println!(
        "{}",
        display::box_row("with author", &with_author.to_string())
    );
    println!(
        "{}",
        display::box_row("with category", &with_category.to_string())
    );
    println!("{}", display::box_row("tagged", &tagged.to_string()));
    println!(
        "{}",
        display::box_row("distinct terms", &index.vocabulary_size().to_string())
    );
    println!("{}", display::box_bottom());
    Ok(())
}
