//! Process bootstrap utilities.

pub mod bootstrap;
