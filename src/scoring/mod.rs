pub mod advice;
pub mod engine;
pub mod factors;

pub use advice::{recommendations, Tier, OPTIMAL_MESSAGE};
pub use engine::{compute, FactorContribution, Prediction};
pub use factors::Factor;
