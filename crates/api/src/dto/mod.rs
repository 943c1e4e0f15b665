pub mod error;
pub mod section;

pub use error::ErrorResponse;
pub use section::{SectionDataResponse, SectionUnavailableResponse};
