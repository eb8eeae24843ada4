pub mod estimate;
pub mod home;

pub use estimate::{estimate_page, EstimateVm};
pub use home::home_page;
