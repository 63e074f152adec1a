//! Displaced individuals: listing, statistics and CSV export.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/individuals` | Paginated, searchable, sortable listing |
//! | GET | `/api/individuals/statistics` | Population statistics |
//! | GET | `/api/individuals/export` | CSV download |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::IndividualService;
