//! Recommendation pipeline
//!
//! A query flows through four stages: [`filter`] narrows the catalog to a
//! bounded candidate set, [`prompt`] renders those candidates into an
//! instruction block, a [`providers::GenerativeProvider`] turns the block
//! into reply text, and [`interpret`] reads the reply back into structured
//! recommendations. [`recommend`] wires the stages together and [`recency`]
//! keeps the rotation ledger that biases each request toward unseen ideas.

pub mod filter;
pub mod interpret;
pub mod prompt;
pub mod providers;
pub mod recency;
pub mod recommend;

pub use recommend::{RecommendOptions, RecommendOutcome, RecommendReply, RecommendationService};
