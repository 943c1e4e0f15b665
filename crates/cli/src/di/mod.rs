pub mod jobs;
pub mod repositories;
pub mod use_cases;

pub use jobs::build_jobs;
pub use repositories::Repositories;
pub use use_cases::UseCases;
