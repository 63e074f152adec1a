mod economic;
mod region;

pub use economic::{EconomicLoss, EconomicStats};
pub use region::Region;
