//! Calendar extractor against a mock HTTP server.

mod common;

use httpmock::prelude::*;
use race_watch::{CalendarExtractor, FetchError, RaceExtractor};
use std::time::Duration;

use common::{calendar_page, calendar_server, calendar_url, CALENDAR_PATH};

#[tokio::test]
async fn fetch_parses_listing_page() {
    let body = calendar_page(&[
        ("Jan 6", "8:00 am", "Joe Kleinerman 10K", "Sold Out", "Central Park"),
        ("Feb 3", "7:30 am", "Manhattan 10K", "Registration Open", "Central Park"),
    ]);
    let server = calendar_server(200, body).await;

    let extractor = CalendarExtractor::new(calendar_url(&server), Duration::from_secs(5)).unwrap();
    let races = extractor.fetch().await.unwrap();

    assert_eq!(races.len(), 2);
    assert_eq!(races[0].title, "Joe Kleinerman 10K");
    assert_eq!(races[0].status, "Sold Out");
    assert_eq!(races[1].title, "Manhattan 10K");
}

#[tokio::test]
async fn fetch_requests_the_page_once_with_user_agent() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(CALENDAR_PATH)
                .header_exists("user-agent");
            then.status(200).body(calendar_page(&[]));
        })
        .await;

    let extractor = CalendarExtractor::new(calendar_url(&server), Duration::from_secs(5)).unwrap();
    extractor.fetch().await.unwrap();

    page.assert_hits_async(1).await;
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let server = calendar_server(503, "unavailable".to_string()).await;
    let url = calendar_url(&server);

    let extractor = CalendarExtractor::new(url.clone(), Duration::from_secs(5)).unwrap();
    let err = extractor.fetch().await.unwrap_err();

    match err {
        FetchError::Status { url: failed, status } => {
            assert_eq!(status, 503);
            assert_eq!(failed, url);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn page_without_listings_yields_empty_calendar() {
    let server = calendar_server(200, "<html><body>Coming soon</body></html>".to_string()).await;

    let extractor = CalendarExtractor::new(calendar_url(&server), Duration::from_secs(5)).unwrap();

    assert!(extractor.fetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Port 9 (discard) on localhost is not expected to be listening.
    let extractor =
        CalendarExtractor::new("http://127.0.0.1:9/", Duration::from_secs(2)).unwrap();

    assert!(matches!(extractor.fetch().await, Err(FetchError::Http(_))));
}
