use crate::constants::*;
use crate::errors::{AppError, AppResult};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Cached CSS selector for the csrf-token meta tag.
/// Compiled once at initialization for performance.
static CSRF_META_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Authenticated client for the iDATA booking site.
///
/// Construction performs the whole session handshake: a GET to the
/// appointment-form page, extraction of the `XSRF-TOKEN` cookie and the
/// `csrf-token` meta tag, and injection of the two consent cookies the site
/// expects before it will answer POST calls. The token pair is never
/// refreshed; callers create one client per logical unit of work and drop it
/// when done, which releases the underlying connection pool.
#[derive(Debug)]
pub struct BookingClient {
    client: reqwest::Client,
    base: Url,
    xsrf_token: String,
    csrf_token: String,
}

impl BookingClient {
    /// Connects to the production booking site.
    pub async fn connect() -> AppResult<Self> {
        Self::connect_to(Url::parse(BOOKING_BASE_URL)?).await
    }

    /// Connects to the booking site at `base` and performs the token handshake.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The appointment-form page cannot be fetched or answers non-2xx
    /// - The `XSRF-TOKEN` cookie is missing from the response
    /// - The HTML carries no `<meta name="csrf-token">` tag
    ///
    /// All of these are treated as fatal by the entry points: without the
    /// token pair no subsequent call can succeed.
    pub async fn connect_to(base: Url) -> AppResult<Self> {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        let form_url = base.join(PATH_APPOINTMENT_FORM)?;
        let response = client.get(form_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::NetworkError(format!(
                "GET request to appointment form failed with status {status}"
            )));
        }
        debug!("GET request to appointment form successful");

        let body = response.text().await?;

        let xsrf_token = cookie_value(jar.as_ref(), &form_url, XSRF_COOKIE_NAME).ok_or_else(
            || AppError::ParseError(format!("{XSRF_COOKIE_NAME} cookie not set by the site")),
        )?;
        debug!(token = %xsrf_token, "XSRF token extracted");

        let csrf_token = extract_csrf_token(&body)?;
        debug!(token = %csrf_token, "CSRF token extracted");

        // The site rejects POST calls until the consent cookies are present.
        for cookie in CONSENT_COOKIES {
            jar.add_cookie_str(cookie, &base);
        }

        Ok(Self {
            client,
            base,
            xsrf_token,
            csrf_token,
        })
    }

    /// The value of the `XSRF-TOKEN` cookie captured at connect time.
    pub fn xsrf_token(&self) -> &str {
        &self.xsrf_token
    }

    /// The value of the `csrf-token` meta tag captured at connect time.
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Header set attached to every POST against the site.
    fn headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert("Accept-Language", HeaderValue::from_static(ACCEPT_LANGUAGE));
        headers.insert("Content-Type", HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(
            "X-CSRF-TOKEN",
            HeaderValue::from_str(&self.csrf_token).map_err(|e| {
                AppError::InvalidInput(format!("CSRF token is not a valid header value: {e}"))
            })?,
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("empty"));
        headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("cors"));
        headers.insert("Sec-Fetch-Site", HeaderValue::from_static("same-origin"));
        Ok(headers)
    }

    /// Sends a form-encoded POST and returns the raw body text.
    ///
    /// Non-2xx statuses are passed through to the caller as body text; the
    /// parsers treat anything without the expected markup as "nothing found".
    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> AppResult<String> {
        let url = self.base.join(path)?;
        let response = self
            .client
            .post(url)
            .headers(self.headers()?)
            .form(form)
            .send()
            .await?;
        debug!(status = %response.status(), path = path, "POST response received");
        Ok(response.text().await?)
    }

    /// Asks the site for the calendar status of a visa office.
    pub async fn get_calendar_status(
        &self,
        visa_office_id: u32,
        service_type_id: u32,
        visa_country_id: u32,
    ) -> AppResult<String> {
        let form = [
            ("getvisaofficeid", visa_office_id.to_string()),
            ("getservicetypeid", service_type_id.to_string()),
            ("getvisacountryid", visa_country_id.to_string()),
        ];
        self.post_form(PATH_GET_CALENDAR_STATUS, &form).await
    }

    /// Submits a passport number for the site's pre-booking control step.
    pub async fn passport_control(&self, passport: &str, country_id: u32) -> AppResult<String> {
        let form = [
            ("passport[]", passport.to_string()),
            ("country_id", country_id.to_string()),
        ];
        self.post_form(PATH_PASSPORT_CONTROL, &form).await
    }

    /// Requests the available appointment dates for an office.
    pub async fn get_date(
        &self,
        consular_id: u32,
        exit_id: u32,
        service_type_id: u32,
        calendar_type: u32,
        total_person: u32,
    ) -> AppResult<String> {
        let form = [
            ("consularid", consular_id.to_string()),
            ("exitid", exit_id.to_string()),
            ("servicetypeid", service_type_id.to_string()),
            ("calendarType", calendar_type.to_string()),
            ("totalperson", total_person.to_string()),
        ];
        self.post_form(PATH_GET_DATE, &form).await
    }

    /// Requests the time slots the site still offers on a specific date.
    #[allow(clippy::too_many_arguments)]
    pub async fn send_date(
        &self,
        full_date: &str,
        total_person: u32,
        consular_id: u32,
        exit_id: u32,
        calendar_type: u32,
        service_type_id: u32,
        personal_info: &str,
    ) -> AppResult<String> {
        let form = [
            ("fulldate", full_date.to_string()),
            ("totalperson", total_person.to_string()),
            ("set_new_consular_id", consular_id.to_string()),
            ("set_new_exit_office_id", exit_id.to_string()),
            ("calendarType", calendar_type.to_string()),
            ("set_new_service_type_id", service_type_id.to_string()),
            ("personalinfo", personal_info.to_string()),
        ];
        self.post_form(PATH_SEND_DATE, &form).await
    }
}

/// Extracts the content of the `csrf-token` meta tag from the form page HTML.
fn extract_csrf_token(html: &str) -> AppResult<String> {
    let selector = CSRF_META_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(CSRF_META_SELECTOR).expect("CSRF_META_SELECTOR is a valid CSS selector")
    });

    let document = Html::parse_document(html);
    document
        .select(selector)
        .filter_map(|el| el.value().attr("content"))
        .next()
        .map(str::to_string)
        .ok_or_else(|| AppError::ParseError("csrf-token meta tag not found in HTML".to_string()))
}

/// Reads a single cookie value back out of the jar for the given URL.
fn cookie_value(jar: &Jar, url: &Url, name: &str) -> Option<String> {
    let header = jar.cookies(url)?;
    let cookies = header.to_str().ok()?;
    cookies.split("; ").find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::{cookie_value, extract_csrf_token};
    use reqwest::cookie::Jar;
    use url::Url;

    #[test]
    fn test_extract_csrf_token_present() {
        let html = r#"
            <html><head>
              <meta charset="utf-8">
              <meta name="csrf-token" content="tok-123">
            </head><body></body></html>
        "#;
        assert_eq!(extract_csrf_token(html).unwrap(), "tok-123");
    }

    #[test]
    fn test_extract_csrf_token_missing_is_error() {
        let html = "<html><head><meta charset='utf-8'></head></html>";
        let err = extract_csrf_token(html).unwrap_err();
        assert!(err.to_string().contains("csrf-token"));
    }

    #[test]
    fn test_extract_csrf_token_first_match_wins() {
        let html = r#"
            <meta name="csrf-token" content="first">
            <meta name="csrf-token" content="second">
        "#;
        assert_eq!(extract_csrf_token(html).unwrap(), "first");
    }

    #[test]
    fn test_cookie_value_finds_named_cookie() {
        let url = Url::parse("https://example.com/").unwrap();
        let jar = Jar::default();
        jar.add_cookie_str("XSRF-TOKEN=abc", &url);
        jar.add_cookie_str("visited=yes", &url);

        assert_eq!(cookie_value(&jar, &url, "XSRF-TOKEN").unwrap(), "abc");
        assert_eq!(cookie_value(&jar, &url, "visited").unwrap(), "yes");
        assert!(cookie_value(&jar, &url, "absent").is_none());
    }
}
