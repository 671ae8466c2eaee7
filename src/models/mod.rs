//! Core data models for the match analyzer.

mod classification;
mod history;
mod ids;
mod match_result;
mod participant;
mod review;

pub use classification::*;
pub use history::*;
pub use ids::*;
pub use match_result::*;
pub use participant::*;
pub use review::*;
