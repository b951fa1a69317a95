//! Business logic services

pub mod classifier;
pub mod estimator;
pub mod geo;
pub mod map_links;
pub mod partition;
pub mod planner;
pub mod profiler;
pub mod records;
pub mod sequencer;
pub mod text;
