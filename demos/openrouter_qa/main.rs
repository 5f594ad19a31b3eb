//! # OpenRouter QA Demo
//!
//! The same session as `policy_qa`, but with answers produced by a
//! real model through the OpenRouter chat-completions API.
//!
//! Requires `OPENROUTER_API_KEY` (or `OPENAI_API_KEY`) in the
//! environment. Retrieval still runs locally over the in-memory
//! document; only the completion call leaves the process.
//!
//! Run: `OPENROUTER_API_KEY=... cargo run --example openrouter_qa`

use std::path::PathBuf;
use std::sync::Arc;

use polqa_agent::PolicySession;
use polqa_core::{DocumentSource, StaticExtractor};
use polqa_model::{OpenRouterClient, OpenRouterConfig};
use polqa_rag::TermFrequencyEmbedder;

const POLICY: &str = "\
Maternity expenses are covered after a continuous coverage period of 24 months, \
subject to a sub-limit of Rs. 50,000 per delivery.

Cataract surgery has a waiting period of two years from the policy start date.

Dental treatment is excluded unless necessitated by an accident requiring \
hospitalization of the insured person.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = OpenRouterConfig::from_env()?
        .with_attribution("https://github.com/polqa-dev/polqa", "polqa demo");
    let llm = OpenRouterClient::new(config)?;

    let embedder = TermFrequencyEmbedder::new([
        "maternity", "cataract", "dental", "waiting", "covered", "excluded",
    ]);

    let session = PolicySession::builder()
        .extractor(Arc::new(StaticExtractor::new(POLICY)))
        .embedder(Arc::new(embedder))
        .llm(Arc::new(llm))
        .build()?;

    let report = session.ingest(DocumentSource::File(PathBuf::from("policy.pdf"))).await?;
    println!("Ingested {} → {} chunk(s)", report.source, report.chunk_count);

    for query in [
        "What is the waiting period for cataract surgery?",
        "Does this policy cover maternity expenses, and up to what amount?",
    ] {
        println!("\nQuery: {query}");
        let answer = session.ask(query).await;
        println!("{}", serde_json::to_string_pretty(&answer)?);
    }

    Ok(())
}
