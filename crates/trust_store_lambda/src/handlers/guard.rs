use std::time::{Duration, Instant};

use trust_store_core::contract::{
    LifecycleRequest, LifecycleResult, NotificationEnvelope, ValidationError,
};
use trust_store_core::deadline::dispatch_budget;

use crate::adapters::callback::CallbackNotifier;
use crate::adapters::object_store::ArtifactStore;
use crate::handlers::dispatcher::LifecycleDispatcher;

pub struct DeadlineGuard<S, N> {
    dispatcher: LifecycleDispatcher<S>,
    notifier: N,
    safety_margin: Duration,
}

struct GuardOutcome {
    result: LifecycleResult,
    reason: Option<String>,
}

impl GuardOutcome {
    fn completed(result: LifecycleResult) -> Self {
        Self {
            result,
            reason: None,
        }
    }

    fn failed(reason: impl Into<String>) -> Self {
        Self {
            result: LifecycleResult::failed(),
            reason: Some(reason.into()),
        }
    }
}

impl<S, N> DeadlineGuard<S, N>
where
    S: ArtifactStore + Send + Sync + 'static,
    N: CallbackNotifier,
{
    pub fn new(dispatcher: LifecycleDispatcher<S>, notifier: N, safety_margin: Duration) -> Self {
        Self {
            dispatcher,
            notifier,
            safety_margin,
        }
    }

    pub async fn run(&self, request: &LifecycleRequest, remaining_millis: i64) {
        let started_at = Instant::now();
        let outcome = self.execute(request, remaining_millis).await;
        let envelope = NotificationEnvelope::new(request, outcome.result, outcome.reason);
        self.deliver(request, &envelope, started_at).await;
    }

    /// Reports a request that could not be built at all, without dispatching.
    pub async fn reject(&self, request: &LifecycleRequest, error: &ValidationError) {
        tracing::warn!(
            component = "deadline_guard",
            event = "request_rejected",
            request_id = %request.request_id,
            error = %error,
        );
        let envelope =
            NotificationEnvelope::new(request, LifecycleResult::failed(), Some(error.to_string()));
        self.deliver(request, &envelope, Instant::now()).await;
    }

    async fn execute(&self, request: &LifecycleRequest, remaining_millis: i64) -> GuardOutcome {
        let validated = match request.validate() {
            Ok(validated) => validated,
            Err(error) => {
                tracing::warn!(
                    component = "deadline_guard",
                    event = "request_rejected",
                    request_id = %request.request_id,
                    error = %error,
                );
                return GuardOutcome::failed(error.to_string());
            }
        };

        let Some(budget) = dispatch_budget(remaining_millis, self.safety_margin) else {
            tracing::error!(
                component = "deadline_guard",
                event = "budget_exhausted",
                request_id = %request.request_id,
                remaining_ms = remaining_millis,
                safety_margin_ms = self.safety_margin.as_millis() as u64,
            );
            return GuardOutcome::failed(format!(
                "only {remaining_millis} ms remained before the deadline"
            ));
        };

        tracing::info!(
            component = "deadline_guard",
            event = "dispatch_started",
            request_id = %request.request_id,
            operation = validated.operation().as_str(),
            budget_ms = budget.as_millis() as u64,
        );

        let dispatcher = self.dispatcher.clone();
        let handle = tokio::task::spawn_blocking(move || dispatcher.dispatch(&validated));

        // Dropping the handle on timeout detaches the task; its result is discarded.
        match tokio::time::timeout(budget, handle).await {
            Ok(Ok(result)) => {
                tracing::info!(
                    component = "deadline_guard",
                    event = "dispatch_completed",
                    request_id = %request.request_id,
                    status = ?result.status,
                );
                GuardOutcome::completed(result)
            }
            Ok(Err(join_error)) => {
                tracing::error!(
                    component = "deadline_guard",
                    event = "dispatch_join_failed",
                    request_id = %request.request_id,
                    error = %join_error,
                );
                GuardOutcome::failed(format!("dispatch did not complete: {join_error}"))
            }
            Err(_) => {
                tracing::error!(
                    component = "deadline_guard",
                    event = "dispatch_timed_out",
                    request_id = %request.request_id,
                    budget_ms = budget.as_millis() as u64,
                );
                GuardOutcome::failed(format!(
                    "dispatch exceeded its {} ms budget",
                    budget.as_millis()
                ))
            }
        }
    }

    async fn deliver(
        &self,
        request: &LifecycleRequest,
        envelope: &NotificationEnvelope,
        started_at: Instant,
    ) {
        match self.notifier.notify(&request.callback_url, envelope).await {
            Ok(status_code) => tracing::info!(
                component = "deadline_guard",
                event = "notification_sent",
                request_id = %request.request_id,
                status = ?envelope.status,
                response_code = status_code,
                elapsed_ms = started_at.elapsed().as_millis() as u64,
            ),
            Err(error) => tracing::error!(
                component = "deadline_guard",
                event = "notification_failed",
                request_id = %request.request_id,
                status = ?envelope.status,
                error = %error,
                elapsed_ms = started_at.elapsed().as_millis() as u64,
            ),
        }
    }
}
