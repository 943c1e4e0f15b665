pub mod record_access;

pub use record_access::{AccessOutcome, RecordAccessUseCase};
