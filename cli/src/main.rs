use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::{paginate, DocId, DocumentStatus, RequestQueue, SearchEngine, Settings};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod load;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Rank short documents against plus/minus queries with TF-IDF", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: Source,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Input path (JSON/JSONL file or a directory of them)
    #[arg(long, global = true, default_value = "./docs")]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, global = true, default_value = "")]
    stop_words: String,
    /// Optional JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query, page by page
    Query {
        #[arg(long)]
        query: String,
        /// ACTUAL, IRRELEVANT, BANNED or REMOVED
        #[arg(long, default_value = "ACTUAL")]
        status: DocumentStatus,
        #[arg(long, default_value_t = 2)]
        page_size: usize,
    },
    /// Show which query words a document matches
    Match {
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
    /// Replay a file of queries (one per line) and report empty results
    Stats {
        #[arg(long)]
        queries: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let (engine, settings) = build_engine(&cli.source)?;

    match cli.command {
        Commands::Query { query, status, page_size } => {
            let results = engine.find_top_documents_by(&query, status)?;
            let pages = paginate(&results, page_size)?;
            for page in pages {
                println!("{page}");
                println!("Page break");
            }
        }
        Commands::Match { query, id } => {
            let (words, status) = engine.match_document(&query, id)?;
            println!("{{ document_id = {id}, status = {status}, words = {} }}", words.join(" "));
        }
        Commands::Stats { queries } => {
            let f = fs::File::open(&queries).with_context(|| format!("opening {}", queries.display()))?;
            let mut queue = RequestQueue::with_config(&engine, settings.request_queue);
            for line in BufReader::new(f).lines() {
                let line = line?;
                if let Err(e) = queue.add_find_request(&line) {
                    tracing::warn!(query = %line, error = %e, "query rejected");
                }
            }
            println!("Total empty requests: {}", queue.no_result_requests());
        }
    }
    Ok(())
}

fn build_engine(source: &Source) -> Result<(SearchEngine, Settings)> {
    let settings = match &source.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Settings::from_json(&text)?
        }
        None => Settings::default(),
    };
    let mut engine = SearchEngine::from_stop_words_text(&source.stop_words)?.with_config(settings.engine.clone());
    load::load_engine(&mut engine, &source.input)?;
    Ok((engine, settings))
}
