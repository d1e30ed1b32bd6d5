//! FactSift server: drivers around the enrichment pipeline.
//!
//! The same `enrichment` service backs both the `factsift run` command
//! and the HTTP routes; neither driver touches the pipeline internals.

pub mod cli;
pub mod enrichment;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;
