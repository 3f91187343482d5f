pub mod ledger;
pub mod model;
pub mod store;

pub use ledger::Ledger;
