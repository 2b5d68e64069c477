//! Opslot CLI - train a topic model on maintenance event metadata and
//! suggest which hour slot best fits a new request.
//!
//! Pipeline: tokenize the query, aggregate the metadata into a document-term
//! matrix, fit the EM mixture model, pick the highest-prior topic, then
//! score the query tokens under both weighting policies.

use anyhow::{Context, Result};
use clap::Parser;
use opslot_corpus::{load_metadata, Corpus, Tokenizer, TokenizerConfig};
use opslot_model::{save_model, EmConfig, MixtureModel};
use opslot_suggest::suggest_slots;
use std::path::PathBuf;
use tracing::{debug, info};

const DEFAULT_ITERATIONS: usize = 250;
const DEFAULT_SEED: u64 = 12345;
const DEFAULT_WORD_COUNT: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "opslot", about = "Suggest hour-of-day slots for maintenance requests")]
struct Args {
    /// Training metadata file (JSON)
    metadata: PathBuf,

    /// New request summary to suggest on
    query: String,

    /// Number of topic clusters (default: ceil(ln(vocab + query tokens)))
    #[arg(long)]
    topics: Option<usize>,

    /// Number of EM iterations
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for model initialization
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of top words to show per topic
    #[arg(long, default_value_t = DEFAULT_WORD_COUNT)]
    words: usize,

    /// Write the fitted model to this path as JSON
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let tokenizer =
        Tokenizer::new(TokenizerConfig::default()).context("Failed to build tokenizer")?;
    let query_tokens = tokenizer.tokenize(&args.query);
    info!("Query tokens: {:?}", query_tokens);

    let metadata = load_metadata(&args.metadata)
        .with_context(|| format!("Failed to load metadata from {}", args.metadata.display()))?;

    let corpus = Corpus::from_metadata(&metadata).context("Failed to aggregate metadata")?;

    let topics = args
        .topics
        .unwrap_or_else(|| default_topics(corpus.vocab_size(), query_tokens.len()));

    info!(
        "Documents: {}  Topic clusters: {}",
        corpus.num_slots(),
        topics
    );

    let model = opslot_model::fit(
        corpus.matrix(),
        &EmConfig {
            topics,
            iterations: args.iterations,
            seed: args.seed,
        },
    )
    .context("Model fitting failed")?;

    let (topic_idx, topic_prob) = model.top_topic();
    debug!("Chosen topic: {}  probability: {}", topic_idx, topic_prob);

    let suggestions = suggest_slots(&query_tokens, &corpus, model.log_p.row(topic_idx))
        .context("Scoring failed")?;

    println!("Suggestions:");
    for (i, suggestion) in suggestions.iter().enumerate() {
        match (&suggestion.token, &suggestion.slot) {
            (Some(pick), Some(slot)) => println!(
                "Decision {} ({} weighting). Term: '{}'. Hour: {}. Frequency: {}",
                i + 1,
                suggestion.policy,
                pick.token,
                slot.slot,
                slot.count
            ),
            (Some(pick), None) => println!(
                "Decision {} ({} weighting). Term: '{}'. No hour slot on record.",
                i + 1,
                suggestion.policy,
                pick.token
            ),
            _ => println!(
                "Decision {} ({} weighting). No query token found in the training vocabulary.",
                i + 1,
                suggestion.policy
            ),
        }
    }

    print_top_words(&model, &corpus, args.words)?;

    if let Some(path) = &args.save_model {
        save_model(path, &model)
            .with_context(|| format!("Failed to save model to {}", path.display()))?;
    }

    Ok(())
}

/// Default topic count: grows with the log of the combined vocabulary
fn default_topics(vocab: usize, query_tokens: usize) -> usize {
    let t = ((vocab + query_tokens) as f64).ln().ceil() as usize;
    t.max(1)
}

/// Print the per-topic top-words table
fn print_top_words(model: &MixtureModel, corpus: &Corpus, n: usize) -> Result<()> {
    let top_words = model
        .top_words(corpus.ranking(), n)
        .context("Top-word table construction failed")?;

    println!("Top {} words per topic:", n);
    for (idx, words) in top_words.iter().enumerate() {
        let prob = model.log_pi[idx].exp();
        println!("  Topic {} (density {:.4}): {}", idx, prob, words.join(", "));
    }

    Ok(())
}
