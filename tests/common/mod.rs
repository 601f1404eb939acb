//! Common test utilities for integration tests

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Appointment-form page carrying both tokens the session handshake needs.
#[allow(dead_code)]
pub const FORM_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="csrf-token" content="csrf-test-token">
  <title>Randevu</title>
</head>
<body><form id="appointment-form"></form></body>
</html>"#;

/// Appointment-form page without the csrf-token meta tag.
#[allow(dead_code)]
pub const FORM_PAGE_NO_META: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Randevu</title></head><body></body></html>"#;

/// Time-slot response with two free and one prime slot.
#[allow(dead_code)]
pub const SLOTS_HTML: &str = r#"
<div class="slots">
  <button class="getdatebtnhour noPrime">09:00</button>
  <button class="getdatebtnhour yesPrime">09:30</button>
  <button class="getdatebtnhour noPrime">10:00</button>
</div>"#;

/// Builds a `getdate` response listing the given dates as form-control cells.
#[allow(dead_code)]
pub fn calendar_html(dates: &[&str]) -> String {
    let options: String = dates
        .iter()
        .map(|d| format!(r#"<option class="form-control">{d}</option>"#))
        .collect();
    format!("<html><body><select id=\"dates\">{options}</select></body></html>")
}

/// Mounts a working appointment-form page (tokens included) on the server.
#[allow(dead_code)]
pub async fn mount_session_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tr/appointment-form"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "XSRF-TOKEN=xsrf-test-token; Path=/")
                .set_body_string(FORM_PAGE_HTML),
        )
        .mount(server)
        .await;
}
