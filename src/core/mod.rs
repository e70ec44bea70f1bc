mod engine;
mod types;
mod validate;

pub use engine::simulate;
pub use types::{DepositFrequency, InterestType, SimulationRequest, TaxTiming, YearRecord};
pub use validate::{ValidationError, validate};
