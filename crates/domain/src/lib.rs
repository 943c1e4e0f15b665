//! Domainstack Domain Layer
pub mod cached_section;
pub mod config;
pub mod decay;
pub mod domain_name;
pub mod errors;
pub mod section;

pub use cached_section::{CachedSection, FetchOutcome, PermanentFailure, SectionResponse};
pub use config::{CliOverrides, Config, ConfigError, LogFormat, RevalidationMode};
pub use decay::{
    apply_decay_to_ttl, decay_multiplier, decay_multiplier_at, decayed_ttl, decayed_ttl_at,
    is_fast_changing, should_stop_revalidation, should_stop_revalidation_at, DecayTier,
};
pub use domain_name::{Domain, DomainName};
pub use errors::DomainError;
pub use section::Section;
