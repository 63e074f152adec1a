mod individual_handler;

pub use individual_handler::*;
