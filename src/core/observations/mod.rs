mod observation;
mod observation_set;

pub use observation::Observation;
pub use observation_set::ObservationSet;
