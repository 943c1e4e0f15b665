pub mod domain_repository;
pub mod section_cache_repository;

pub use domain_repository::SqliteDomainRepository;
pub use section_cache_repository::SqliteSectionCacheRepository;
