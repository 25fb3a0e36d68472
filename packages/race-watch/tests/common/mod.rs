// Common test utilities

#![allow(dead_code)]

use httpmock::prelude::*;

pub const CALENDAR_PATH: &str = "/fullraceyearindex";

/// Render a calendar page with one listing block per
/// `(date, time, title, status, location)` tuple.
pub fn calendar_page(races: &[(&str, &str, &str, &str, &str)]) -> String {
    let blocks: Vec<String> = races
        .iter()
        .map(|(date, time, title, status, location)| {
            format!(
                r#"<div class="index_listing__inner">
                     <div class="index_listing__date">{date}</div>
                     <div class="index_listing__time">{time}</div>
                     <div class="index_listing__title"><a href="/races/x">{title}</a></div>
                     <div class="index_listing__status">{status}</div>
                     <div class="index_listing__location">{location}</div>
                   </div>"#
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html><html><head><title>Races</title></head><body>{}</body></html>",
        blocks.join("\n")
    )
}

/// Start a mock calendar site answering the yearly index with `status` and `body`.
pub async fn calendar_server(status: u16, body: String) -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(CALENDAR_PATH)
                .query_param("year", "2024");
            then.status(status)
                .header("content-type", "text/html; charset=utf-8")
                .body(body);
        })
        .await;
    server
}

/// Calendar URL served by `server`.
pub fn calendar_url(server: &MockServer) -> String {
    format!("{}?year=2024", server.url(CALENDAR_PATH))
}
