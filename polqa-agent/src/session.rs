//! The single-document QA session.
//!
//! [`PolicySession`] owns the process-wide document state behind an
//! exclusive-access lock rather than ambient globals. One document and
//! its index are loaded at a time; a new ingest replaces them
//! wholesale. Queries take an `Arc` snapshot of the loaded state, so
//! an ingest racing an in-flight ask is safe: the ask completes
//! against the superseded (immutable) index and returns a stale but
//! well-formed answer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use polqa_core::{
    AnswerResult, CoreError, DocumentSource, Llm, Result as CoreResult, TextExtractor,
    supported_extension,
};
use polqa_rag::{
    Chunk, Chunker, Document, EmbeddingProvider, ParagraphChunker, RetrievalConfig, Retriever,
    VectorIndex,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::error::IngestError;
use crate::normalize::normalize;
use crate::prompt::{PromptBuilder, ResponseMode};

/// System instruction sent with every JSON-mode completion.
const SYSTEM_INSTRUCTION_JSON: &str =
    "You are an AI assistant that analyzes documents and provides JSON responses.";
/// System instruction sent with every plain-mode completion.
const SYSTEM_INSTRUCTION_PLAIN: &str =
    "You are an AI assistant that analyzes documents and answers questions concisely.";

/// A loaded document with its chunks and index. Immutable once built;
/// shared with in-flight queries via `Arc`.
struct LoadedDocument {
    document: Document,
    chunks: Vec<Chunk>,
    /// `None` when the document produced zero retainable chunks —
    /// a valid "no retrievable content" state, not an error.
    index: Option<VectorIndex>,
    loaded_at: DateTime<Utc>,
}

/// Result of a successful ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Short identity of the ingested document.
    pub source: String,
    /// Number of chunks retained after the length filter.
    pub chunk_count: usize,
}

/// A point-in-time view of the session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    /// Whether a document is currently loaded.
    pub document_loaded: bool,
    /// Identity of the loaded document, if any.
    pub source: Option<String>,
    /// Number of chunks held for the loaded document.
    pub chunk_count: usize,
    /// When the current document was ingested.
    pub loaded_at: Option<DateTime<Utc>>,
}

/// The QA session: ingest one policy document, then ask questions
/// against it.
///
/// Every ask returns a well-formed [`AnswerResult`]; recoverable
/// failures (model errors, malformed model output, nothing ingested)
/// are folded into the result rather than surfaced as errors. Ingest
/// failures leave the previously loaded document untouched.
///
/// # Example
///
/// ```rust,ignore
/// use polqa_agent::PolicySession;
///
/// let session = PolicySession::builder()
///     .extractor(extractor)
///     .embedder(embedder)
///     .llm(llm)
///     .build()?;
///
/// session.ingest(DocumentSource::Url(url)).await?;
/// let answer = session.ask("What is the waiting period for cataract surgery?").await;
/// ```
pub struct PolicySession {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn Llm>,
    chunker: Arc<dyn Chunker>,
    retriever: Retriever,
    config: RetrievalConfig,
    prompt: PromptBuilder,
    state: RwLock<Option<Arc<LoadedDocument>>>,
}

impl PolicySession {
    /// Create a new [`PolicySessionBuilder`].
    pub fn builder() -> PolicySessionBuilder {
        PolicySessionBuilder::default()
    }

    /// Ingest a document: validate format, extract text, chunk, embed,
    /// index, and only then replace the current state.
    ///
    /// Serializes with other ingests on the state lock. The previous
    /// document is replaced only after the new state is fully built,
    /// so a failed re-ingest never leaves the session empty.
    ///
    /// # Errors
    ///
    /// [`IngestError::UnsupportedFormat`] for non-PDF/DOCX/EML sources,
    /// [`IngestError::Download`] / [`IngestError::Extraction`] from the
    /// extraction boundary, [`IngestError::EmptyDocument`] when no text
    /// came back, and [`IngestError::Rag`] if embedding fails.
    pub async fn ingest(&self, source: DocumentSource) -> Result<IngestReport, IngestError> {
        let extension = source.extension().unwrap_or_default();
        if !supported_extension(&extension) {
            return Err(IngestError::UnsupportedFormat { extension });
        }

        let text = self.extractor.extract(&source).await.map_err(|e| match e {
            CoreError::Download(message) => IngestError::Download(message),
            other => IngestError::Extraction(other.to_string()),
        })?;
        if text.trim().is_empty() {
            return Err(IngestError::EmptyDocument);
        }

        let chunks = self.chunker.chunk(&text);
        let index = if chunks.is_empty() {
            None
        } else {
            Some(VectorIndex::build(self.embedder.as_ref(), &chunks).await?)
        };

        let document = Document::new(source, text);
        let report =
            IngestReport { source: document.source.label(), chunk_count: chunks.len() };
        let loaded =
            LoadedDocument { document, chunks, index, loaded_at: Utc::now() };

        *self.state.write().await = Some(Arc::new(loaded));
        info!(source = %report.source, chunk_count = report.chunk_count, "ingested document");
        Ok(report)
    }

    /// Answer one query against the currently loaded document.
    ///
    /// Infallible by construction: no document, no retrievable content,
    /// retrieval failure, and model failure all map to well-formed
    /// results (`Unable to determine` or `Error` decisions).
    pub async fn ask(&self, query: &str) -> AnswerResult {
        let snapshot = self.state.read().await.clone();
        let Some(loaded) = snapshot else {
            return self.degenerate("No document has been ingested.");
        };
        let Some(index) = &loaded.index else {
            return self.degenerate("The ingested document contains no retrievable text.");
        };

        let retrieved = match self
            .retriever
            .retrieve(query, index, &loaded.chunks, self.config.top_k)
            .await
        {
            Ok(retrieved) => retrieved,
            Err(e) => {
                error!(error = %e, "retrieval failed");
                return AnswerResult::error(format!("Error generating response: {e}"));
            }
        };

        let prompt = self.prompt.build(query, &retrieved);
        match self.llm.complete(self.system_instruction(), &prompt).await {
            Ok(raw) => {
                info!(model = self.llm.name(), "query completed");
                normalize(&raw, self.prompt.mode())
            }
            Err(e) => {
                error!(model = self.llm.name(), error = %e, "completion failed");
                AnswerResult::error(format!("Error generating response: {e}"))
            }
        }
    }

    /// Answer a batch of queries in order.
    ///
    /// One result per query, input order preserved. Queries are
    /// independent: a failure on one (reported as its `Error`-decision
    /// result) never aborts its siblings.
    pub async fn ask_many(&self, queries: &[String]) -> Vec<AnswerResult> {
        let mut answers = Vec::with_capacity(queries.len());
        for query in queries {
            answers.push(self.ask(query).await);
        }
        answers
    }

    /// Drop the loaded document and its index.
    pub async fn clear(&self) {
        *self.state.write().await = None;
        info!("session cleared");
    }

    /// A snapshot of the session state.
    pub async fn status(&self) -> SessionStatus {
        match self.state.read().await.as_ref() {
            Some(loaded) => SessionStatus {
                document_loaded: true,
                source: Some(loaded.document.source.label()),
                chunk_count: loaded.chunks.len(),
                loaded_at: Some(loaded.loaded_at),
            },
            None => SessionStatus {
                document_loaded: false,
                source: None,
                chunk_count: 0,
                loaded_at: None,
            },
        }
    }

    /// The degenerate-answer shape for asks that never reach the model.
    fn degenerate(&self, reason: &str) -> AnswerResult {
        match self.prompt.mode() {
            ResponseMode::Json => AnswerResult::unable(reason),
            ResponseMode::Plain => AnswerResult::plain(reason),
        }
    }

    fn system_instruction(&self) -> &'static str {
        match self.prompt.mode() {
            ResponseMode::Json => SYSTEM_INSTRUCTION_JSON,
            ResponseMode::Plain => SYSTEM_INSTRUCTION_PLAIN,
        }
    }
}

/// Builder for constructing a [`PolicySession`].
///
/// `extractor`, `embedder`, and `llm` are required; the chunker,
/// retrieval config, and prompt builder default to production values.
#[derive(Default)]
pub struct PolicySessionBuilder {
    extractor: Option<Arc<dyn TextExtractor>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    llm: Option<Arc<dyn Llm>>,
    chunker: Option<Arc<dyn Chunker>>,
    config: Option<RetrievalConfig>,
    prompt: Option<PromptBuilder>,
}

impl PolicySessionBuilder {
    /// Set the text-extraction collaborator.
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the embedding provider used for both index build and query
    /// embedding. One instance for both is the embedding-space
    /// consistency invariant.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the completion backend.
    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Override the chunker (defaults to [`ParagraphChunker`] built
    /// from the retrieval config).
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Override the retrieval configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the prompt builder (response mode, token ceiling).
    pub fn prompt(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Build the [`PolicySession`], validating that all required
    /// collaborators are set.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if a required field is missing.
    pub fn build(self) -> CoreResult<PolicySession> {
        let extractor = self
            .extractor
            .ok_or_else(|| CoreError::Config("extractor is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| CoreError::Config("embedder is required".to_string()))?;
        let llm = self.llm.ok_or_else(|| CoreError::Config("llm is required".to_string()))?;

        let config = self.config.unwrap_or_default();
        let chunker = self
            .chunker
            .unwrap_or_else(|| Arc::new(ParagraphChunker::from_config(&config)));
        let retriever = Retriever::new(Arc::clone(&embedder), config.snippet_len);

        Ok(PolicySession {
            extractor,
            embedder,
            llm,
            chunker,
            retriever,
            config,
            prompt: self.prompt.unwrap_or_default(),
            state: RwLock::new(None),
        })
    }
}
