pub mod get_section;

pub use get_section::{GetDomainSectionUseCase, SectionView};
