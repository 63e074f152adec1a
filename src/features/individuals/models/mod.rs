mod export;
mod individual;
mod statistics;

pub use export::{render_csv, CSV_HEADERS};
pub use individual::Individual;
pub use statistics::IndividualStatistics;

#[cfg(test)]
pub(crate) use individual::fixtures as individual_fixtures;
