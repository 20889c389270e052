pub mod engine;

pub use engine::{recommend, recommend_pricing};
