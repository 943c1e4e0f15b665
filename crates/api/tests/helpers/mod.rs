#![allow(dead_code)]


pub use mock_repositories::*;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domainstack_api::{create_api_routes, AppState};
use domainstack_application::services::{DedupGuard, SweepBackend};
use domainstack_application::use_cases::{
    GetDomainSectionUseCase, LookupAndPersistUseCase, RecordAccessUseCase,
    ScheduleRevalidationUseCase, WarmCacheUseCase,
};
use domainstack_domain::RevalidationMode;
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const CRON_SECRET: &str = "s3cret-token";

pub struct TestApp {
    pub router: Router,
    pub domains: Arc<MockDomainRepository>,
    pub fetcher: Arc<MockFetcher>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_secret(Some(CRON_SECRET))
    }

    pub fn with_secret(secret: Option<&str>) -> Self {
        let domains = Arc::new(MockDomainRepository::new());
        let cache = Arc::new(MockSectionCache::new());
        let fetcher = Arc::new(MockFetcher::new());

        let scheduler = Arc::new(ScheduleRevalidationUseCase::new(
            Arc::new(SweepBackend::new()),
            Arc::new(MockLedger::new()),
        ));
        let lookup = Arc::new(LookupAndPersistUseCase::new(
            fetcher.clone(),
            cache.clone(),
            domains.clone(),
            scheduler,
            Arc::new(DedupGuard::new(
                Arc::new(MockClaimStore::new()),
                Duration::from_secs(300),
            )),
        ));

        let state = AppState {
            get_section: Arc::new(GetDomainSectionUseCase::new(
                domains.clone(),
                cache.clone(),
                lookup.clone(),
            )),
            record_access: Arc::new(RecordAccessUseCase::new(
                domains.clone(),
                Arc::new(MockLedger::new()),
            )),
            warm_cache: Arc::new(WarmCacheUseCase::new(domains.clone(), cache, lookup)),
            mode: RevalidationMode::Pull,
            cron_secret: secret.map(Arc::from),
        };

        Self {
            router: create_api_routes(state),
            domains,
            fetcher,
        }
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get_json(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri, bearer).await;
        (status, serde_json::from_str(&body).unwrap())
    }
}
