pub mod claims;
pub mod database;
pub mod ledger;
pub mod lookup;
pub mod repositories;
pub mod workflow;
