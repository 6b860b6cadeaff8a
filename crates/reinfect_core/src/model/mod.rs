mod ensemble;
mod parameters;
mod priors;
mod protocol;

pub use ensemble::{EnsembleColumns, SampleEnsemble};
pub use parameters::{Domain, Parameter, ParameterVector, TREATMENT_DELAY_DAYS};
pub use priors::Prior;
pub use protocol::Protocol;
