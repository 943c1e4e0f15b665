pub mod cron;
pub mod health;
pub mod sections;

pub use cron::run_warm_cache;
pub use health::health_check;
pub use sections::get_domain_section;
