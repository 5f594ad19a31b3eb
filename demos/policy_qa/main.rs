//! # Policy QA Demo
//!
//! Full session lifecycle against an in-memory policy document: ingest,
//! single query, batch queries, status, clear.
//!
//! Uses `StaticExtractor`, `TermFrequencyEmbedder`, and a scripted
//! `MockLlm`, so it runs with **zero API keys**.
//!
//! Run: `cargo run --example policy_qa`

use std::path::PathBuf;
use std::sync::Arc;

use polqa_agent::PolicySession;
use polqa_core::{DocumentSource, StaticExtractor};
use polqa_model::MockLlm;
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

    // -- 1. Assemble the session ------------------------------------------
    // The embedder scores chunks by how often these terms occur, so the
    // nearest-neighbor search is predictable without a real model.
    let embedder = TermFrequencyEmbedder::new([
        "maternity", "cataract", "dental", "waiting", "covered", "excluded",
    ]);
    let llm = MockLlm::new()
        .with_reply(
            r#"{"decision": "Covered", "amount": null,
                "justification": "Cataract surgery is covered after a two-year waiting period."}"#,
        )
        .with_reply(
            r#"{"decision": "Partially Covered", "amount": "Rs. 50,000",
                "justification": "Maternity is covered after 24 months, capped per delivery."}"#,
        )
        .with_reply(
            r#"{"decision": "Not Covered", "amount": null,
                "justification": "Dental treatment is excluded unless caused by an accident."}"#,
        );

    let session = PolicySession::builder()
        .extractor(Arc::new(StaticExtractor::new(POLICY)))
        .embedder(Arc::new(embedder))
        .llm(Arc::new(llm))
        .build()?;

    // -- 2. Ingest ---------------------------------------------------------
    let report = session.ingest(DocumentSource::File(PathBuf::from("policy.pdf"))).await?;
    println!("Ingested {} → {} chunk(s)", report.source, report.chunk_count);

    // -- 3. Single query ---------------------------------------------------
    let answer = session.ask("Is cataract surgery covered?").await;
    println!("\nSingle query:\n{}", serde_json::to_string_pretty(&answer)?);

    // -- 4. Batch queries --------------------------------------------------
    let queries: Vec<String> = [
        "Does this policy cover maternity expenses?",
        "Is dental treatment covered?",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect();

    println!("\nBatch of {}:", queries.len());
    for (query, answer) in queries.iter().zip(session.ask_many(&queries).await) {
        println!("  Q: {query}");
        println!("  A: {}", serde_json::to_string(&answer)?);
    }

    // -- 5. Status and teardown --------------------------------------------
    let status = session.status().await;
    println!("\nStatus: {}", serde_json::to_string(&status)?);
    session.clear().await;
    println!("Cleared: loaded={}", session.status().await.document_loaded);

    Ok(())
}
