//! Conflict regions feature.
//!
//! Regions carry a severity level (1-10), an economic loss breakdown whose
//! total is always the sum of housing, income and assets, and a predicted
//! future loss.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/regions` | List regions, most severe first |
//! | GET | `/api/regions/by-severity` | Regions at or above a severity |
//! | GET | `/api/regions/economic-stats` | Loss totals across regions |
//! | GET | `/api/regions/{id}` | Get region by id |
//! | PATCH | `/api/regions/{id}` | Partial update (admin) |
//! | PUT | `/api/regions/{id}/prediction` | Set predicted loss (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RegionService;
