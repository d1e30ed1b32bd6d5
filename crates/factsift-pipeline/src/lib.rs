//! FactSift Pipeline: query templates, entity processing, fan-out runs.
//!
//! `EntityProcessor` handles one entity: render query → search →
//! summarize → fallback extraction. `EnrichmentPipeline` runs the
//! processor over a whole entity list with a bounded number in flight
//! and returns records in input order.

pub mod pipeline;
pub mod processor;
pub mod progress;
pub mod template;

#[cfg(test)]
mod test_support;

pub use pipeline::EnrichmentPipeline;
pub use processor::EntityProcessor;
pub use progress::{LogProgress, NoProgress, ProgressSink};
pub use template::{QueryTemplate, DEFAULT_TEMPLATE, ENTITY_PLACEHOLDER};
