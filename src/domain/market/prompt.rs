//! Prompt construction for the action-plan request.

use super::SchemaVariant;
use crate::domain::hotel::HotelContext;

/// Builds the natural-language instruction sent to the model.
///
/// Every context field is embedded verbatim. Tasks asking for segments,
/// offers and pricing are only included when the variant requests them, so
/// the instruction never asks for fields the schema does not declare.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    variant: SchemaVariant,
}

impl PromptBuilder {
    /// Creates a builder for the given schema variant.
    pub fn new(variant: SchemaVariant) -> Self {
        Self { variant }
    }

    /// Renders the instruction for a context snapshot.
    pub fn build(&self, context: &HotelContext) -> String {
        let mut prompt = format!(
            "Act as a Senior Revenue & Guest Experience Consultant for a mid-sized city hotel in {}.\n\
             Goal: Increase profitability by {}% in {} months.\n\n\
             Current Metrics:\n\
             - RevPAR: ${} | ADR: ${} | Occupancy: {}%\n\n\
             Tasks:\n",
            context.city,
            context.target_profitability_percent,
            context.timeframe_months,
            context.current_revpar,
            context.current_adr,
            context.current_occupancy_percent
        );

        for (i, task) in self.tasks(context).iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, task));
        }

        prompt.push_str("\nReturn the response in JSON format.\n");
        prompt
    }

    fn tasks(&self, context: &HotelContext) -> Vec<String> {
        let mut tasks = vec![
            format!(
                "Use Google Search for real-time market data in {} (competitor rates, upcoming events, local demand).",
                context.city
            ),
            "Analyze (simulated) transaction patterns: High business travel during weekdays, \
             family leisure on weekends, significant untapped spa/dining potential."
                .to_string(),
        ];

        if self.variant.includes_segments() {
            tasks.push("Identify 3 distinct guest segments with specific characteristics.".to_string());
            tasks.push(
                "Create personalized offers for each segment (upgrades, spa, dining, local tours) \
                 with delivery channel strategies (pre-arrival email, app notification, check-in)."
                    .to_string(),
            );
            tasks.push(
                "Provide Dynamic Pricing recommendations: Adjust room rates based on current \
                 market trends found via search."
                    .to_string(),
            );
        }

        tasks.push(
            "Provide a structured action plan for Revenue, Ops, Guest Exp, and Tech.".to_string(),
        );
        tasks
    }
}
