//! RefreshAnalysisHandler - Runs one analysis for the current context.
//!
//! The dashboard lock is taken twice, briefly: once to issue a ticket and
//! once to commit. It is never held across the remote call, so edits and
//! further refreshes proceed while a request is in flight. Only the newest
//! ticket's result is committed.
//!
//! The call and its commit run on a spawned task, so a caller that stops
//! waiting (client disconnect, request timeout) never leaves its ticket
//! unsettled with the dashboard stuck loading.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::handlers::market_analysis::{
    AnalysisError, GenerateActionPlanCommand, GenerateActionPlanHandler,
};
use crate::domain::dashboard::{CommitOutcome, DashboardView, RequestTicket, DEFAULT_ERROR_MESSAGE};

use super::SharedDashboard;

/// Result of one refresh.
#[derive(Debug, Clone)]
pub struct RefreshAnalysisResult {
    /// Dashboard view after the commit attempt.
    pub view: DashboardView,
    /// Whether the result was committed or superseded.
    pub outcome: CommitOutcome,
    /// The pipeline failure, if this request failed.
    pub error: Option<AnalysisError>,
}

impl RefreshAnalysisResult {
    pub fn is_stale(&self) -> bool {
        !self.outcome.is_applied()
    }
}

/// Handler for refreshing the market analysis.
pub struct RefreshAnalysisHandler {
    state: SharedDashboard,
    action_plan: Arc<GenerateActionPlanHandler>,
}

impl RefreshAnalysisHandler {
    pub fn new(state: SharedDashboard, action_plan: Arc<GenerateActionPlanHandler>) -> Self {
        Self { state, action_plan }
    }

    pub async fn handle(&self) -> RefreshAnalysisResult {
        let ticket = self.state.write().await.begin_request();

        let task = tokio::spawn(run_and_commit(
            self.state.clone(),
            self.action_plan.clone(),
            ticket.clone(),
        ));

        match task.await {
            Ok(result) => result,
            Err(join_error) => {
                error!(
                    request_id = %ticket.request_id(),
                    error = %join_error,
                    "Market analysis task aborted"
                );
                let mut state = self.state.write().await;
                let outcome = state.commit_failure(&ticket, DEFAULT_ERROR_MESSAGE);
                RefreshAnalysisResult {
                    view: state.view(),
                    outcome,
                    error: None,
                }
            }
        }
    }
}

async fn run_and_commit(
    state: SharedDashboard,
    action_plan: Arc<GenerateActionPlanHandler>,
    ticket: RequestTicket,
) -> RefreshAnalysisResult {
    let cmd = GenerateActionPlanCommand::new(ticket.context().clone())
        .with_request_id(ticket.request_id());
    let result = action_plan.handle(cmd).await;

    let mut state = state.write().await;
    let (outcome, error) = match result {
        Ok(analysis) => (state.commit_success(&ticket, analysis), None),
        Err(err) => (state.commit_failure(&ticket, &err.user_message()), Some(err)),
    };

    match outcome {
        CommitOutcome::Applied => info!(
            request_id = %ticket.request_id(),
            generation = ticket.generation(),
            failed = error.is_some(),
            "Committed market analysis result"
        ),
        CommitOutcome::Stale { latest_generation } => warn!(
            request_id = %ticket.request_id(),
            generation = ticket.generation(),
            latest_generation,
            "Dropped stale market analysis result"
        ),
    }

    RefreshAnalysisResult {
        view: state.view(),
        outcome,
        error,
    }
}
