//! Answer assembly and final parsing
//!
//! - `accumulator` - folds status events into answer text and an outcome
//! - `trailer` - splits a finished answer into main text and recommended
//!   follow-up questions, plus HTML escaping for markup embedding

mod accumulator;
pub mod trailer;

pub use accumulator::{Outcome, Progress, ResponseAccumulator};
pub use trailer::{escape_html, parse_answer, RECOMMENDED_DELIMITER};
