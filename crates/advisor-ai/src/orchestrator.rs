//! Resilient recommendation orchestrator.
//!
//! One request walks an explicit state machine:
//!
//! ```text
//! Idle -> Attempting(0) -> Succeeded
//!                       -> Retrying(1) -> Attempting(1) -> ...
//!                       -> Failed
//!                       -> Cancelled
//! ```
//!
//! Each attempt is bounded by the policy's fixed timeout. Only retryable
//! errors move to `Retrying`, and never beyond `max_retries`.

use advisor_core::error::AdvisorError;
use advisor_core::traits::CompletionService;
use advisor_core::types::{Recommendation, RecommendationRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::parser::parse_response;
use crate::prompt::{completion_request, ModelSettings};
use crate::retry::RetryPolicy;
use crate::validate::validate;

/// Terminal failure of a recommendation request.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("recommendation failed after {attempts} attempt(s): {error}")]
pub struct RecommendationFailure {
    /// Last classified error.
    pub error: AdvisorError,
    /// Completion attempts made, zero when the request never reached the service.
    pub attempts: u32,
}

impl From<AdvisorError> for RecommendationFailure {
    fn from(error: AdvisorError) -> Self {
        Self { error, attempts: 0 }
    }
}

/// Lifecycle of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    /// Attempt number, 0-based.
    Attempting(u32),
    /// Waiting out the backoff before attempt `next`.
    Retrying { next: u32, last_error: AdvisorError },
    Succeeded { recommendation: Recommendation, attempts: u32 },
    Failed { error: AdvisorError, attempts: u32 },
    Cancelled { attempts: u32 },
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded { .. } | Self::Failed { .. } | Self::Cancelled { .. }
        )
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Attempting(_) => "attempting",
            Self::Retrying { .. } => "retrying",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

/// Drives completion calls for recommendation requests.
///
/// Holds no per-request state, so one orchestrator serves concurrent requests.
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    client: Arc<dyn CompletionService>,
    policy: RetryPolicy,
    settings: ModelSettings,
}

impl std::fmt::Debug for RecommendationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationOrchestrator")
            .field("client", &self.client.name())
            .field("policy", &self.policy)
            .field("settings", &self.settings)
            .finish()
    }
}

impl RecommendationOrchestrator {
    pub fn new(client: Arc<dyn CompletionService>, policy: RetryPolicy, settings: ModelSettings) -> Self {
        Self {
            client,
            policy,
            settings,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Produce a recommendation without external cancellation.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendationFailure> {
        self.recommend_with_cancel(request, &CancelToken::never()).await
    }

    /// Produce a recommendation, giving up as soon as `cancel` fires.
    pub async fn recommend_with_cancel(
        &self,
        request: &RecommendationRequest,
        cancel: &CancelToken,
    ) -> Result<Recommendation, RecommendationFailure> {
        let request_id = Uuid::new_v4();
        let span = info_span!("recommend", symbol = %request.symbol, request_id = %request_id);
        self.run(request, cancel).instrument(span).await
    }

    async fn run(
        &self,
        request: &RecommendationRequest,
        cancel: &CancelToken,
    ) -> Result<Recommendation, RecommendationFailure> {
        let completion = completion_request(request, &self.settings);
        let mut state = RequestState::Idle;

        loop {
            state = match state {
                RequestState::Idle => {
                    if cancel.is_cancelled() {
                        RequestState::Cancelled { attempts: 0 }
                    } else {
                        RequestState::Attempting(0)
                    }
                }

                RequestState::Attempting(attempt) => {
                    debug!(attempt, max_attempts = self.policy.max_attempts(), "Calling completion service");
                    let outcome = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => None,
                        outcome = self.attempt(&completion) => Some(outcome),
                    };

                    match outcome {
                        None => RequestState::Cancelled { attempts: attempt + 1 },
                        Some(Ok(recommendation)) => RequestState::Succeeded {
                            recommendation,
                            attempts: attempt + 1,
                        },
                        Some(Err(error)) if error.is_retryable() && attempt < self.policy.max_retries => {
                            warn!(
                                attempt,
                                error = %error,
                                kind = %error.kind(),
                                delay_ms = self.policy.delay(attempt).as_millis() as u64,
                                "Attempt failed, will retry"
                            );
                            RequestState::Retrying {
                                next: attempt + 1,
                                last_error: error,
                            }
                        }
                        Some(Err(error)) => RequestState::Failed {
                            error,
                            attempts: attempt + 1,
                        },
                    }
                }

                RequestState::Retrying { next, last_error } => {
                    let delay = self.policy.delay(next - 1);
                    debug!(next, last_error = %last_error, "Backing off");
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => RequestState::Cancelled { attempts: next },
                        _ = tokio::time::sleep(delay) => RequestState::Attempting(next),
                    }
                }

                RequestState::Succeeded { recommendation, attempts } => {
                    info!(
                        attempts,
                        action = %recommendation.recommendation,
                        confidence = recommendation.confidence,
                        "Recommendation succeeded"
                    );
                    return Ok(recommendation);
                }

                RequestState::Failed { error, attempts } => {
                    error!(attempts, error = %error, kind = %error.kind(), "Recommendation failed");
                    return Err(RecommendationFailure { error, attempts });
                }

                RequestState::Cancelled { attempts } => {
                    info!(attempts, "Recommendation cancelled");
                    return Err(RecommendationFailure {
                        error: AdvisorError::Cancelled,
                        attempts,
                    });
                }
            };
            debug!(state = state.name(), "State transition");
        }
    }

    /// One bounded completion call plus parsing and validation.
    async fn attempt(
        &self,
        completion: &advisor_core::traits::CompletionRequest,
    ) -> Result<Recommendation, AdvisorError> {
        let timeout = self.policy.attempt_timeout;
        let content = tokio::time::timeout(timeout, self.client.complete(completion))
            .await
            .map_err(|_| AdvisorError::Timeout { after: timeout })??;

        let object = parse_response(&content)?;
        validate(&object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::cancellation;
    use crate::prompt::tests::sample_request;
    use advisor_core::traits::CompletionRequest;
    use advisor_core::types::Action;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    const VALID: &str = r#"{"recommendation":"HOLD","confidence":0.55,"targetPrice":195,"stopLoss":176,"reasoning":"Range bound between support and resistance.","risks":["Rate decision"]}"#;

    enum Step {
        Reply(&'static str),
        Fail(AdvisorError),
        Hang,
    }

    /// Plays back scripted steps; the last step repeats forever.
    struct ScriptedService {
        steps: Mutex<VecDeque<Step>>,
        last: Step,
        calls: AtomicU32,
    }

    impl ScriptedService {
        fn new(mut steps: Vec<Step>) -> Arc<Self> {
            let last = steps.pop().unwrap_or(Step::Hang);
            Arc::new(Self {
                steps: Mutex::new(steps.into()),
                last,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedService {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, AdvisorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.steps.lock().unwrap().pop_front();
            let step = step.as_ref().unwrap_or(&self.last);
            match step {
                Step::Reply(text) => Ok(text.to_string()),
                Step::Fail(error) => Err(error.clone()),
                Step::Hang => std::future::pending().await,
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            attempt_timeout: Duration::from_secs(60),
            backoff_base: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }

    fn orchestrator(service: Arc<ScriptedService>) -> RecommendationOrchestrator {
        RecommendationOrchestrator::new(service, policy(), ModelSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt() {
        let service = ScriptedService::new(vec![Step::Reply(VALID)]);
        let rec = orchestrator(service.clone()).recommend(&sample_request()).await.unwrap();

        assert_eq!(rec.recommendation, Action::Hold);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_timeout_exhausts_budget() {
        let service = ScriptedService::new(vec![Step::Hang]);
        let started = tokio::time::Instant::now();

        let failure = orchestrator(service.clone())
            .recommend(&sample_request())
            .await
            .unwrap_err();

        assert_eq!(service.calls(), 4);
        assert_eq!(failure.attempts, 4);
        assert_eq!(
            failure.error,
            AdvisorError::Timeout {
                after: Duration::from_secs(60)
            }
        );
        // 4 fixed timeouts plus 1 + 2 + 4 seconds of backoff
        assert_eq!(started.elapsed(), Duration::from_secs(4 * 60 + 7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrapped_response_parses_like_bare() {
        let wrapped: &'static str =
            Box::leak(format!("here you go: {VALID} thanks").into_boxed_str());

        let bare = orchestrator(ScriptedService::new(vec![Step::Reply(VALID)]))
            .recommend(&sample_request())
            .await
            .unwrap();
        let salvaged = orchestrator(ScriptedService::new(vec![Step::Reply(wrapped)]))
            .recommend(&sample_request())
            .await
            .unwrap();

        assert_eq!(bare, salvaged);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unauthorized_is_not_retried() {
        let service = ScriptedService::new(vec![Step::Fail(AdvisorError::Unauthorized(
            "invalid api key".to_string(),
        ))]);

        let failure = orchestrator(service.clone())
            .recommend(&sample_request())
            .await
            .unwrap_err();

        assert_eq!(service.calls(), 1);
        assert_eq!(failure.attempts, 1);
        assert!(matches!(failure.error, AdvisorError::Unauthorized(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_is_not_retried() {
        let service = ScriptedService::new(vec![Step::Fail(AdvisorError::RateLimited {
            retry_after_secs: Some(20),
        })]);

        let failure = orchestrator(service.clone())
            .recommend(&sample_request())
            .await
            .unwrap_err();

        assert_eq!(service.calls(), 1);
        assert_eq!(
            failure.error,
            AdvisorError::RateLimited {
                retry_after_secs: Some(20)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_field_fails_without_retry() {
        let service = ScriptedService::new(vec![Step::Reply(
            r#"{"recommendation":"BUY","targetPrice":200,"stopLoss":170,"reasoning":"x","risks":["y"]}"#,
        )]);

        let failure = orchestrator(service.clone())
            .recommend(&sample_request())
            .await
            .unwrap_err();

        assert_eq!(service.calls(), 1);
        assert_eq!(
            failure.error,
            AdvisorError::SchemaValidation {
                missing_fields: vec!["confidence".to_string()],
                invalid_fields: vec![],
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success() {
        let service = ScriptedService::new(vec![
            Step::Fail(AdvisorError::Transient("502 Bad Gateway".to_string())),
            Step::Reply("I cannot help with that."),
            Step::Reply(VALID),
        ]);
        let started = tokio::time::Instant::now();

        let rec = orchestrator(service.clone()).recommend(&sample_request()).await.unwrap();

        assert_eq!(rec.recommendation, Action::Hold);
        assert_eq!(service.calls(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(1 + 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_parse_failure_exhausts_budget() {
        let service = ScriptedService::new(vec![Step::Reply("not json at all")]);

        let failure = orchestrator(service.clone())
            .recommend(&sample_request())
            .await
            .unwrap_err();

        assert_eq!(service.calls(), 4);
        assert!(matches!(failure.error, AdvisorError::ParseFailure(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_retry_policy_single_attempt() {
        let service = ScriptedService::new(vec![Step::Fail(AdvisorError::Transient("reset".into()))]);
        let orchestrator = RecommendationOrchestrator::new(
            service.clone(),
            RetryPolicy::no_retry(Duration::from_secs(5)),
            ModelSettings::default(),
        );

        let failure = orchestrator.recommend(&sample_request()).await.unwrap_err();
        assert_eq!(service.calls(), 1);
        assert_eq!(failure.attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_attempt() {
        let service = ScriptedService::new(vec![Step::Hang]);
        let orchestrator = orchestrator(service.clone());
        let (handle, token) = cancellation();

        let task = tokio::spawn(async move {
            orchestrator.recommend_with_cancel(&sample_request(), &token).await
        });
        tokio::time::sleep(Duration::from_secs(10)).await;
        handle.cancel();

        let failure = task.await.unwrap().unwrap_err();
        assert_eq!(failure.error, AdvisorError::Cancelled);
        assert_eq!(failure.attempts, 1);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff() {
        let service = ScriptedService::new(vec![
            Step::Fail(AdvisorError::Transient("503".to_string())),
            Step::Reply(VALID),
        ]);
        let orchestrator = RecommendationOrchestrator::new(
            service.clone(),
            RetryPolicy {
                backoff_base: Duration::from_secs(10),
                ..policy()
            },
            ModelSettings::default(),
        );
        let (handle, token) = cancellation();

        let task = tokio::spawn(async move {
            orchestrator.recommend_with_cancel(&sample_request(), &token).await
        });
        tokio::time::sleep(Duration::from_secs(5)).await;
        handle.cancel();

        let failure = task.await.unwrap().unwrap_err();
        assert_eq!(failure.error, AdvisorError::Cancelled);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let service = ScriptedService::new(vec![Step::Reply(VALID)]);
        let (handle, token) = cancellation();
        handle.cancel();

        let failure = orchestrator(service.clone())
            .recommend_with_cancel(&sample_request(), &token)
            .await
            .unwrap_err();

        assert_eq!(failure.attempts, 0);
        assert_eq!(service.calls(), 0);
    }

    #[test]
    fn test_failure_display() {
        let failure = RecommendationFailure {
            error: AdvisorError::SchemaValidation {
                missing_fields: vec!["confidence".to_string()],
                invalid_fields: vec![],
            },
            attempts: 1,
        };
        assert_eq!(
            failure.to_string(),
            "recommendation failed after 1 attempt(s): Invalid recommendation: missing fields - confidence"
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RequestState::Idle.is_terminal());
        assert!(!RequestState::Attempting(0).is_terminal());
        assert!(RequestState::Cancelled { attempts: 0 }.is_terminal());
    }
}
