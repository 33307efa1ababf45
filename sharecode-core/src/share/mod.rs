//! Share/open orchestration
//!
//! This module provides `ShareCode`, which builds the candidate service list,
//! drives the user's choice and surfaces the result.

mod orchestrator;

pub use orchestrator::{OpenOutcome, ShareCode, ShareOutcome};
