pub mod ledger;
pub mod persona;
pub mod stats;

pub use ledger::assign_realized_pnl;
pub use persona::{classify, Persona, PersonaFeatures, PersonaProfile};
pub use stats::compute_stats;
