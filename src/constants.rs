// Booking site endpoints
pub const BOOKING_BASE_URL: &str = "https://deu-schengen.idata.com.tr";
pub const PATH_APPOINTMENT_FORM: &str = "tr/appointment-form";
pub const PATH_GET_CALENDAR_STATUS: &str = "tr/getcalendarstatus";
pub const PATH_PASSPORT_CONTROL: &str = "tr/personal/passport-control";
pub const PATH_GET_DATE: &str = "tr/getdate";
pub const PATH_SEND_DATE: &str = "tr/senddate";

// Messaging gateway
pub const CALLMEBOT_URL: &str = "https://api.callmebot.com/whatsapp.php";

// Session tokens and consent cookies
pub const XSRF_COOKIE_NAME: &str = "XSRF-TOKEN";
pub const CSRF_META_SELECTOR: &str = r#"meta[name="csrf-token"]"#;
pub const CONSENT_COOKIES: &[&str] = &["c_policy=ok", "visited=yes"];

// Request headers
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:109.0)";
pub const ACCEPT_LANGUAGE: &str = "tr,en-US;q=0.7,en;q=0.3";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

// Markup selectors
pub const AVAILABLE_DATE_SELECTOR: &str = ".form-control";
pub const FREE_SLOT_CLASS: &str = "noPrime";
pub const PRIME_SLOT_CLASS: &str = "yesPrime";
pub const VIP_SLOT_CLASS: &str = "yesVip";
pub const ANY_SLOT_CLASS: &str = "getdatebtnhour";

// Date format used by the booking site on every boundary
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// All calls to the booking site and the gateway block at most this long
pub const HTTP_TIMEOUT_SECS: u64 = 10;

// Default query identifiers for the German consulate flow
pub const DEFAULT_CONSULAR_ID: u32 = 2;
pub const DEFAULT_SERVICE_TYPE_ID: u32 = 1;
pub const DEFAULT_CALENDAR_TYPE: u32 = 2;
pub const DEFAULT_TOTAL_PERSON: u32 = 1;

/// Opaque personal-info token the site expects on slot queries.
pub const DEFAULT_PERSONAL_INFO: &str = "eyJpdiI6ImUzRlYwV0JYbFRFaTdoR2luYkJ4eUE9PSIsInZh\
bHVlIjoicVdUUHpOOWJZclR0OEYxVFJEYkhaZz09IiwibWFj\
IjoiNzY3MGUyNDMxMWUxZDE1ZGQ3MjM4MTU2ODU1MTA1NjAx\
NTA2M2NjOTFlYWQxZGY4YjYwZGIxZjIxMjczN2FhMyJ9";
