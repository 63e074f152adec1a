mod recommendation;

pub use recommendation::{RawRecommendation, Recommendation, UrgencyLevel};
