pub mod contract;
pub mod pricing;
pub mod profile;
