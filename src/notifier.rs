use crate::constants::{CALLMEBOT_URL, HTTP_TIMEOUT_SECS};
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{error, info};
use url::Url;

/// Sends WhatsApp messages through the CallMeBot gateway.
///
/// Each phone number needs its own gateway API key, registered up front. A
/// missing key at send time is a configuration error and is reported as such
/// rather than silently skipped.
pub struct WhatsAppNotifier {
    client: reqwest::Client,
    api_url: Url,
    api_keys: BTreeMap<String, String>,
}

impl WhatsAppNotifier {
    pub fn new() -> AppResult<Self> {
        Self::with_api_url(Url::parse(CALLMEBOT_URL)?)
    }

    /// Uses a non-default gateway URL. Exists for tests against a local mock.
    pub fn with_api_url(api_url: Url) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_url,
            api_keys: BTreeMap::new(),
        })
    }

    /// Registers (or overwrites) the gateway API key for a phone number.
    pub fn register(&mut self, phone: &str, api_key: &str) {
        self.api_keys.insert(phone.to_string(), api_key.to_string());
    }

    /// Registered phone numbers, in stable sorted order.
    pub fn phones(&self) -> impl Iterator<Item = &str> {
        self.api_keys.keys().map(String::as_str)
    }

    /// Sends a message to one phone number.
    ///
    /// Returns `Ok(true)` on HTTP success and `Ok(false)` (logged) when the
    /// gateway answers non-2xx or the request fails at the network level.
    ///
    /// # Errors
    ///
    /// `MissingApiKey` if the phone number was never registered.
    pub async fn send(&self, phone: &str, message: &str) -> AppResult<bool> {
        let api_key = self
            .api_keys
            .get(phone)
            .ok_or_else(|| AppError::MissingApiKey(phone.to_string()))?;

        let mut request_url = self.api_url.clone();
        request_url
            .query_pairs_mut()
            .append_pair("phone", phone)
            .append_pair("text", message)
            .append_pair("apikey", api_key);

        let response = match self.client.get(request_url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(phone = phone, error = %e, "Failed to reach messaging gateway");
                return Ok(false);
            }
        };

        if !response.status().is_success() {
            error!(
                phone = phone,
                status = %response.status(),
                "Failed to send WhatsApp message"
            );
            return Ok(false);
        }

        info!(phone = phone, message = message, "WhatsApp message sent");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::WhatsAppNotifier;

    #[test]
    fn test_register_overwrites_existing_key() {
        let mut notifier = WhatsAppNotifier::new().unwrap();
        notifier.register("+905551112233", "old-key");
        notifier.register("+905551112233", "new-key");

        assert_eq!(notifier.api_keys.get("+905551112233").unwrap(), "new-key");
    }

    #[test]
    fn test_phones_sorted_and_complete() {
        let mut notifier = WhatsAppNotifier::new().unwrap();
        notifier.register("+905559990000", "k2");
        notifier.register("+905551112233", "k1");

        let phones: Vec<&str> = notifier.phones().collect();
        assert_eq!(phones, vec!["+905551112233", "+905559990000"]);
    }

    #[tokio::test]
    async fn test_send_without_registration_is_fatal() {
        let notifier = WhatsAppNotifier::new().unwrap();
        let err = notifier.send("+905551112233", "hello").await.unwrap_err();
        assert!(err.to_string().contains("No API key"));
    }
}
