//! Market analysis result types.
//!
//! Field names on the wire are camelCase, exactly as the output schema
//! declares them, so the same types decode the model's JSON and serialize
//! back out to dashboard clients.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{AnalysisRequestId, Timestamp};

/// Priority of a recommended action.
///
/// Closed set: any other literal in a response is a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// The literals accepted on the wire.
    pub const LITERALS: &'static [&'static str] = &["High", "Medium", "Low"];

    /// Returns the display label for this priority.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One categorised action in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Area of the business (Revenue, Ops, Guest Exp, Tech).
    pub category: String,
    pub action: String,
    pub goal: String,
    pub impact: String,
    pub priority: Priority,
}

/// An offer tailored to a guest segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedOffer {
    pub title: String,
    pub description: String,
    /// How the offer reaches the guest (pre-arrival email, app, check-in).
    pub delivery_channel: String,
}

/// A guest cohort identified by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSegment {
    pub name: String,
    /// Share of guests, nominally 0-100. Not range-checked.
    pub percentage: f64,
    pub characteristics: Vec<String>,
    pub personalized_offers: Vec<PersonalizedOffer>,
}

/// A recommended room-rate change for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateAdjustment {
    pub segment: String,
    pub current_rate: f64,
    pub recommended_rate: f64,
    pub reason: String,
}

impl RateAdjustment {
    /// Recommended minus current rate.
    pub fn delta(&self) -> f64 {
        self.recommended_rate - self.current_rate
    }
}

/// A web page the model's search grounding cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// The structured body the model returns, after schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBody {
    pub market_sentiment: String,
    pub competitor_trends: String,
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub segments: Vec<GuestSegment>,
    #[serde(default)]
    pub rate_adjustments: Vec<RateAdjustment>,
}

/// Validated result of one analysis request.
///
/// Replaced wholesale on every successful request; never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub request_id: AnalysisRequestId,
    pub generated_at: Timestamp,
    pub market_sentiment: String,
    pub competitor_trends: String,
    pub recommendations: Vec<Recommendation>,
    pub segments: Vec<GuestSegment>,
    pub rate_adjustments: Vec<RateAdjustment>,
    pub grounding_sources: Vec<GroundingSource>,
}

impl MarketAnalysis {
    /// Merges a validated body with the citations from the same response.
    pub fn assemble(
        request_id: AnalysisRequestId,
        body: AnalysisBody,
        grounding_sources: Vec<GroundingSource>,
    ) -> Self {
        Self {
            request_id,
            generated_at: Timestamp::now(),
            market_sentiment: body.market_sentiment,
            competitor_trends: body.competitor_trends,
            recommendations: body.recommendations,
            segments: body.segments,
            rate_adjustments: body.rate_adjustments,
            grounding_sources,
        }
    }

    /// Recommendations with the given priority, in plan order.
    pub fn recommendations_with(&self, priority: Priority) -> impl Iterator<Item = &Recommendation> {
        self.recommendations
            .iter()
            .filter(move |r| r.priority == priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recommendation(priority: Priority) -> Recommendation {
        Recommendation {
            category: "Revenue".to_string(),
            action: "Raise weekend rates".to_string(),
            goal: "Capture event demand".to_string(),
            impact: "+3% RevPAR".to_string(),
            priority,
        }
    }

    #[test]
    fn priority_serializes_as_literal() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"Low\"");
    }

    #[test]
    fn priority_rejects_other_casing() {
        assert!(serde_json::from_str::<Priority>("\"high\"").is_err());
        assert!(serde_json::from_str::<Priority>("\"Urgent\"").is_err());
    }

    #[test]
    fn literals_match_variants() {
        for literal in Priority::LITERALS {
            let parsed: Priority = serde_json::from_value(json!(literal)).unwrap();
            assert_eq!(parsed.label(), *literal);
        }
    }

    #[test]
    fn body_defaults_missing_extensions_to_empty() {
        let body: AnalysisBody = serde_json::from_value(json!({
            "marketSentiment": "Buoyant",
            "competitorTrends": "Rates rising",
            "recommendations": []
        }))
        .unwrap();

        assert!(body.segments.is_empty());
        assert!(body.rate_adjustments.is_empty());
    }

    #[test]
    fn segment_uses_camel_case_wire_names() {
        let segment: GuestSegment = serde_json::from_value(json!({
            "name": "Weekday business",
            "percentage": 45,
            "characteristics": ["Short stays"],
            "personalizedOffers": [{
                "title": "Late checkout",
                "description": "Free until 2pm",
                "deliveryChannel": "App notification"
            }]
        }))
        .unwrap();

        assert_eq!(segment.percentage, 45.0);
        assert_eq!(segment.personalized_offers[0].delivery_channel, "App notification");
    }

    #[test]
    fn rate_adjustment_delta() {
        let adj = RateAdjustment {
            segment: "Leisure".to_string(),
            current_rate: 180.0,
            recommended_rate: 195.0,
            reason: "Festival weekend".to_string(),
        };
        assert_eq!(adj.delta(), 15.0);
    }

    #[test]
    fn assemble_keeps_body_and_sources() {
        let body = AnalysisBody {
            market_sentiment: "Buoyant".to_string(),
            competitor_trends: "Rates rising".to_string(),
            recommendations: vec![recommendation(Priority::High), recommendation(Priority::Low)],
            segments: vec![],
            rate_adjustments: vec![],
        };
        let sources = vec![GroundingSource {
            title: "Visit London".to_string(),
            uri: "https://example.com/events".to_string(),
        }];
        let id = AnalysisRequestId::new();

        let analysis = MarketAnalysis::assemble(id, body, sources.clone());

        assert_eq!(analysis.request_id, id);
        assert_eq!(analysis.market_sentiment, "Buoyant");
        assert_eq!(analysis.grounding_sources, sources);
        assert_eq!(analysis.recommendations_with(Priority::High).count(), 1);
        assert_eq!(analysis.recommendations_with(Priority::Medium).count(), 0);
    }
}
