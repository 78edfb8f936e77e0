//! Recommendation orchestration for the stock advisor.
//!
//! This crate provides:
//! - Prompt construction from an indicator snapshot
//! - A two-stage response parser and schema validator
//! - The retrying, cancellable [`RecommendationOrchestrator`]
//! - An OpenAI-compatible HTTP completion client
//! - The end-to-end [`StockAdvisor`] pipeline

pub mod advisor;
pub mod cancel;
pub mod client;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod retry;
pub mod validate;

pub use advisor::{AnalysisReport, StockAdvisor};
pub use cancel::{cancellation, CancelHandle, CancelToken};
pub use client::{classify_status, CompletionConfig, OpenAiCompatibleClient};
pub use orchestrator::{RecommendationFailure, RecommendationOrchestrator, RequestState};
pub use parser::{parse_response, MAX_SCAN_BYTES};
pub use prompt::{build_prompt, completion_request, ModelSettings, SYSTEM_INSTRUCTION};
pub use retry::RetryPolicy;
pub use validate::{validate, REQUIRED_FIELDS};
