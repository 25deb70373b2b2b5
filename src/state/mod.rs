//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PipelineStage`: the stage machine each company pipeline walks through

mod pipeline_stage;

pub use pipeline_stage::PipelineStage;
