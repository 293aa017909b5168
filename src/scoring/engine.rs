use serde::Serialize;

use super::advice::{recommendations, Tier, OPTIMAL_MESSAGE};
use super::factors::Factor;
use crate::inputs::InputRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,      // e.g. "Sleep quality"
    pub normalized: f64,    // Factor value before weighting
    pub weight: f64,
    pub points: f64,        // weight * normalized * 100, before clamping
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub score: f64,
    pub tier: Tier,
    pub recommendations: Vec<String>,
    pub breakdown: Vec<FactorContribution>,
}

impl Prediction {
    /// Interpretation line for the score's tier.
    pub fn interpretation(&self) -> String {
        self.tier.message(self.score)
    }

    /// Recommendations to show, or the single optimal-lifestyle message.
    pub fn advice(&self) -> Vec<String> {
        if self.recommendations.is_empty() {
            vec![OPTIMAL_MESSAGE.to_string()]
        } else {
            self.recommendations.clone()
        }
    }
}

/// Compute the cognitive score for one set of inputs.
///
/// Pure and deterministic: no I/O, no shared state. Gender is accepted but
/// does not contribute to the score.
pub fn compute(inputs: &InputRecord) -> Prediction {
    let breakdown: Vec<FactorContribution> = Factor::ALL
        .iter()
        .map(|factor| {
            let normalized = factor.normalize(inputs);
            FactorContribution {
                label: factor.label().to_string(),
                normalized,
                weight: factor.weight(),
                points: factor.weight() * normalized * 100.0,
            }
        })
        .collect();

    let raw: f64 = Factor::ALL
        .iter()
        .map(|factor| factor.weight() * factor.normalize(inputs))
        .sum();
    let score = (raw * 100.0).clamp(0.0, 100.0);

    Prediction {
        score,
        tier: Tier::from_score(score),
        recommendations: recommendations(inputs),
        breakdown,
    }
}
