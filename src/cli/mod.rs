//! Terminal front end: commands and their rendering.

pub mod chart;
pub mod lookup;
pub mod search;
pub mod setup;
pub mod ui;
