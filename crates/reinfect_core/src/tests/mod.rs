//! Integration tests for the reinfection analysis
//!
//! Tests are organized by topic:
//! - `model_properties` - Range, slope and limit properties of the transmission model
//! - `posterior` - Acceptance filtering on sampled ensembles
//! - `pipeline` - End-to-end runs of the full analysis

mod model_properties;
mod posterior;
