mod context;
mod recommendation_service;

pub use context::{PgContextSource, RecommendationContextSource};
pub use recommendation_service::RecommendationService;
