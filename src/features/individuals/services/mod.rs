mod individual_service;

pub use individual_service::IndividualService;
