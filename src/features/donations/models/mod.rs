mod donation;
mod stats;

pub use donation::{Donation, DonationType};
pub use stats::{rank_donors, DonationTotals, DonorTotal};
