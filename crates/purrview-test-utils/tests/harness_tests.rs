// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the session core and the catalog core, run through
//! the test harness.

use std::time::Duration;

use futures::StreamExt;
use purrview_catalog::{PageLoad, load_gallery};
use purrview_core::{ApiError, BreedImage, LoginRequest, TotalSource};
use purrview_session::GuardDecision;
use purrview_test_utils::{CatalogOp, InMemoryCatalog, TestHarness};

async fn harness() -> TestHarness {
    TestHarness::builder().build().await.unwrap()
}

#[tokio::test]
async fn login_updates_every_observer_before_returning() {
    let h = harness().await;
    let mut early = h.auth.subscribe();

    h.login().await.unwrap();

    let mut late = h.auth.subscribe();
    assert_eq!(early.drain(), vec![false, true]);
    assert_eq!(late.drain(), vec![true]);
    assert!(h.guard.check("/profile").is_allowed());
}

#[tokio::test]
async fn observers_as_streams_see_logout_too() {
    let h = harness().await;
    let sub = h.auth.subscribe();
    h.login().await.unwrap();
    h.auth.logout();
    h.auth.logout();

    let seen: Vec<bool> = sub.take(3).collect().await;
    assert_eq!(seen, vec![false, true, false]);
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let h = harness().await;
    let err = h
        .auth
        .login(&LoginRequest {
            email: "ana@example.com".into(),
            password: "nope".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::InvalidCredentials);
    assert!(!h.auth.is_authenticated());
    assert_eq!(
        h.guard.check("/cats"),
        GuardDecision::Deny {
            redirect_to: "/login".into()
        }
    );
}

#[tokio::test]
async fn server_faults_are_classified() {
    let h = harness().await;
    h.auth_api.fail_all_with(503).await;
    let err = h
        .auth
        .login(&TestHarness::valid_credentials())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::ServerFault { status: 503 });
}

#[tokio::test]
async fn profile_round_trip_uses_stored_token() {
    let h = harness().await;
    assert_eq!(h.auth.get_profile().await.unwrap_err(), ApiError::InvalidCredentials);
    let before = h.auth_api.request_count().await;
    assert_eq!(before, 0);

    h.login().await.unwrap();
    let profile = h.auth.get_profile().await.unwrap();
    assert_eq!(&profile, h.auth_api.user());
    assert_eq!(h.auth.current_user().as_ref(), Some(h.auth_api.user()));
}

#[tokio::test]
async fn browser_walks_to_the_end_with_known_total() {
    let h = harness().await;
    let first = h.browser.load_page(1).await.unwrap().applied().unwrap();
    assert_eq!(first.source, TotalSource::Known);
    assert_eq!((first.total, first.total_pages), (34, 4));

    let past_end = h.browser.load_page(7).await.unwrap().applied().unwrap();
    assert_eq!(past_end.page, 4);
    assert_eq!(past_end.items.len(), 4);
}

#[tokio::test]
async fn browser_estimates_when_probe_fails() {
    let h = harness().await;
    h.catalog.fail(CatalogOp::Count, ApiError::NetworkUnreachable);

    let p3 = h.browser.load_page(3).await.unwrap().applied().unwrap();
    assert_eq!(p3.source, TotalSource::Estimated);
    assert_eq!((p3.total, p3.total_pages), (40, 4));

    let p4 = h.browser.load_page(4).await.unwrap().applied().unwrap();
    assert_eq!((p4.total, p4.total_pages), (34, 4));
}

#[tokio::test]
async fn overlapping_loads_keep_the_newest() {
    let h = std::sync::Arc::new(harness().await);
    h.browser.initialize().await;
    h.catalog.delay_page(1, Duration::from_millis(300));

    let slow = {
        let h = std::sync::Arc::clone(&h);
        tokio::spawn(async move { h.browser.load_page(1).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = h.browser.load_page(3).await.unwrap();

    assert!(matches!(fast, PageLoad::Applied(_)));
    assert_eq!(slow.await.unwrap().unwrap(), PageLoad::Stale);
    assert_eq!(h.browser.current().map(|p| p.page), Some(3));
}

#[tokio::test]
async fn search_reports_exact_totals() {
    let h = harness().await;
    let found = h.browser.search("breed 2", 1).await.unwrap().applied().unwrap();
    // Eleven names match; the first page of ten is the whole answer.
    assert_eq!(found.total, 10);
    assert_eq!(found.total_pages, 1);
    assert_eq!(found.source, TotalSource::Exact);
}

#[tokio::test]
async fn gallery_falls_back_to_representative_image() {
    let image = BreedImage {
        id: "rep".into(),
        url: "https://cdn.example/rep.jpg".into(),
        width: 640,
        height: 480,
    };
    let mut breed = purrview_core::BreedRecord {
        id: "beng".into(),
        name: "Bengal".into(),
        ..Default::default()
    };
    breed.image = Some(image.clone());
    let catalog = InMemoryCatalog::new(vec![breed]);
    catalog.fail(CatalogOp::Images, ApiError::Timeout {
        duration: Duration::from_secs(30),
    });

    let gallery = load_gallery(&catalog, "beng").await.unwrap();
    assert_eq!(gallery.images, vec![image]);
}

#[tokio::test]
async fn estimated_walk_stops_on_the_last_full_page() {
    let h = TestHarness::builder().with_breeds(40).build().await.unwrap();
    h.catalog.fail(CatalogOp::Count, ApiError::NetworkUnreachable);

    let last = h.browser.load_page(5).await.unwrap().applied().unwrap();
    assert_eq!((last.page, last.total, last.total_pages), (4, 40, 4));
    assert!(!last.has_next());
}
