pub mod http_fetcher;

pub use http_fetcher::HttpSectionFetcher;
