//! DashboardState - Context, loading flag, latest analysis and latest error.
//!
//! Requests may overlap. Each one is issued a [`RequestTicket`] carrying a
//! generation number; only the ticket of the most recent generation may
//! commit. Older completions are reported as [`CommitOutcome::Stale`] and
//! leave the state untouched.

use serde::Serialize;

use crate::domain::foundation::{AnalysisRequestId, ValidationError};
use crate::domain::hotel::{ContextField, HotelContext, KeyMetrics};
use crate::domain::market::MarketAnalysis;
use crate::domain::projection::{ProfitProjection, ProjectionCalculator};

/// Message shown when a failure carries no text of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to fetch market analysis";

/// Proof that a request was issued, with the context it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    generation: u64,
    request_id: AnalysisRequestId,
    context: HotelContext,
}

impl RequestTicket {
    /// Generation number of this request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Correlation id for logs.
    pub fn request_id(&self) -> AnalysisRequestId {
        self.request_id
    }

    /// Snapshot of the context at the time the request was issued.
    pub fn context(&self) -> &HotelContext {
        &self.context
    }
}

/// Result of committing a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The result became the dashboard's state.
    Applied,
    /// A newer request was issued; the result was dropped.
    Stale { latest_generation: u64 },
}

impl CommitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommitOutcome::Applied)
    }
}

/// Mutable dashboard state for one session.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    context: HotelContext,
    analysis: Option<MarketAnalysis>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl DashboardState {
    /// Creates state for a starting context.
    pub fn new(context: HotelContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn context(&self) -> &HotelContext {
        &self.context
    }

    pub fn analysis(&self) -> Option<&MarketAnalysis> {
        self.analysis.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Generation of the most recently issued request (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the context wholesale. An out-of-range context is rejected
    /// and the current one kept.
    pub fn update_context(&mut self, context: HotelContext) -> Result<(), ValidationError> {
        context.validate()?;
        self.context = context;
        Ok(())
    }

    /// Applies raw form input to one field of the context. If the coerced
    /// value is out of range the context is left unchanged.
    pub fn set_field(&mut self, field: ContextField, raw: &str) -> Result<(), ValidationError> {
        let updated = self.context.clone().with_field(field, raw);
        self.update_context(updated)
    }

    /// Issues a new request: bumps the generation, sets loading, clears the error.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;

        RequestTicket {
            generation: self.generation,
            request_id: AnalysisRequestId::new(),
            context: self.context.clone(),
        }
    }

    /// Commits a successful analysis if the ticket is still current.
    pub fn commit_success(&mut self, ticket: &RequestTicket, analysis: MarketAnalysis) -> CommitOutcome {
        if let Some(stale) = self.check_current(ticket) {
            return stale;
        }
        self.analysis = Some(analysis);
        self.error = None;
        self.loading = false;
        CommitOutcome::Applied
    }

    /// Commits a failure if the ticket is still current.
    ///
    /// The previous analysis is kept; only the error changes.
    pub fn commit_failure(&mut self, ticket: &RequestTicket, message: &str) -> CommitOutcome {
        if let Some(stale) = self.check_current(ticket) {
            return stale;
        }
        let message = message.trim();
        self.error = Some(if message.is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message.to_string()
        });
        self.loading = false;
        CommitOutcome::Applied
    }

    fn check_current(&self, ticket: &RequestTicket) -> Option<CommitOutcome> {
        (ticket.generation != self.generation).then_some(CommitOutcome::Stale {
            latest_generation: self.generation,
        })
    }

    /// Snapshot for rendering, with derived metrics and projection.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            context: self.context.clone(),
            metrics: KeyMetrics::from_context(&self.context),
            projection: ProjectionCalculator::for_context(&self.context),
            analysis: self.analysis.clone(),
            loading: self.loading,
            error: self.error.clone(),
            generation: self.generation,
        }
    }
}

/// Everything the dashboard renders, derived from one state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub context: HotelContext,
    pub metrics: KeyMetrics,
    pub projection: Vec<ProfitProjection>,
    pub analysis: Option<MarketAnalysis>,
    pub loading: bool,
    pub error: Option<String>,
    pub generation: u64,
}
