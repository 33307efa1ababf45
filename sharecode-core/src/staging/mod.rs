//! Local staging of retrieved content
//!
//! This module provides the `StagingArea` where services materialize remote
//! items before they are shown to the user.

mod area;

pub use area::StagingArea;
