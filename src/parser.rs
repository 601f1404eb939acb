use crate::constants::*;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

/// Cached CSS selector for available-date cells.
/// Compiled once at initialization for performance.
static AVAILABLE_DATE_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Category of appointment time slot, distinguished by style class in the
/// site's markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    Free,
    Prime,
    Vip,
    Other,
}

impl SlotType {
    /// Returns a human-readable name for the slot type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Prime => "prime",
            Self::Vip => "vip",
            Self::Other => "other",
        }
    }

    /// Returns the CSS class the site uses to mark buttons of this slot type.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Free => FREE_SLOT_CLASS,
            Self::Prime => PRIME_SLOT_CLASS,
            Self::Vip => VIP_SLOT_CLASS,
            Self::Other => ANY_SLOT_CLASS,
        }
    }
}

impl From<&str> for SlotType {
    fn from(value: &str) -> Self {
        // Trim whitespace and compare case-insensitively
        match value.trim().to_lowercase().as_str() {
            "free" => Self::Free,
            "prime" => Self::Prime,
            "vip" => Self::Vip,
            // Default silently to Other; callers can decide to log if needed.
            _ => Self::Other,
        }
    }
}

/// Extracts the available dates from a `getdate` response body.
///
/// Collects the trimmed text of every element carrying the `form-control`
/// class, in document order. Empty or malformed HTML yields an empty list,
/// never an error; elements with empty text are kept as empty strings.
pub fn parse_available_dates(html: &str) -> Vec<String> {
    let selector = AVAILABLE_DATE_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(AVAILABLE_DATE_SELECTOR)
            .expect("AVAILABLE_DATE_SELECTOR is a valid CSS selector")
    });

    let result = collect_text(html, selector);
    debug!(count = result.len(), "Available dates parsed");
    result
}

/// Extracts the open time slots of the given type from a `senddate` response
/// body.
///
/// Matches only elements carrying the slot type's class; returns their trimmed
/// text in document order, or an empty list when none exist.
pub fn parse_available_hours(html: &str, slot_type: SlotType) -> Vec<String> {
    // Class names are known-valid selectors, so parsing cannot fail here.
    let selector = Selector::parse(&format!(".{}", slot_type.class_name()))
        .expect("slot type class is a valid CSS selector");

    let result = collect_text(html, &selector);
    debug!(
        count = result.len(),
        slot_type = slot_type.display_name(),
        "Available hours parsed"
    );
    result
}

fn collect_text(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_available_dates, parse_available_hours, SlotType};

    #[test]
    fn test_parse_available_dates_trims_and_preserves_order() {
        let html = r#"
            <html><body>
              <select>
                <option class="form-control">01-11-2023</option>
                <option class="form-control">  02-11-2023  </option>
                <option class="form-control"></option>
              </select>
            </body></html>
        "#;

        let dates = parse_available_dates(html);
        assert_eq!(dates, vec!["01-11-2023", "02-11-2023", ""]);
    }

    #[test]
    fn test_parse_available_dates_ignores_other_classes() {
        let html = r#"
            <div class="form-group">10-11-2023</div>
            <div class="formcontrol">11-11-2023</div>
        "#;
        assert!(parse_available_dates(html).is_empty());
    }

    #[test]
    fn test_parse_available_dates_empty_html() {
        assert!(parse_available_dates("").is_empty());
    }

    #[test]
    fn test_parse_available_dates_malformed_html() {
        let html = "<div class=\"form-control\">07-11-2023<div><<<span";
        let dates = parse_available_dates(html);
        assert_eq!(dates[0], "07-11-2023");
    }

    #[test]
    fn test_parse_available_hours_free_matches_no_prime_only() {
        let html = r#"
            <button class="getdatebtnhour noPrime">09:00</button>
            <button class="getdatebtnhour yesPrime">09:30</button>
            <button class="getdatebtnhour noPrime"> 10:00 </button>
            <button class="getdatebtnhour yesVip">11:00</button>
        "#;

        let hours = parse_available_hours(html, SlotType::Free);
        assert_eq!(hours, vec!["09:00", "10:00"]);
    }

    #[test]
    fn test_parse_available_hours_empty_when_no_match() {
        let html = r#"<button class="getdatebtnhour yesPrime">09:30</button>"#;
        assert!(parse_available_hours(html, SlotType::Free).is_empty());
    }

    #[test]
    fn test_parse_available_hours_other_matches_generic_buttons() {
        let html = r#"
            <button class="getdatebtnhour noPrime">09:00</button>
            <button class="getdatebtnhour yesPrime">09:30</button>
        "#;

        let hours = parse_available_hours(html, SlotType::Other);
        assert_eq!(hours, vec!["09:00", "09:30"]);
    }

    #[test]
    fn test_slot_type_from_str() {
        assert_eq!(SlotType::from("free"), SlotType::Free);
        assert_eq!(SlotType::from(" Prime "), SlotType::Prime);
        assert_eq!(SlotType::from("VIP"), SlotType::Vip);
        assert_eq!(SlotType::from("anything-else"), SlotType::Other);
        assert_eq!(SlotType::from(""), SlotType::Other);
    }

    #[test]
    fn test_slot_type_class_names() {
        assert_eq!(SlotType::Free.class_name(), "noPrime");
        assert_eq!(SlotType::Prime.class_name(), "yesPrime");
        assert_eq!(SlotType::Vip.class_name(), "yesVip");
        assert_eq!(SlotType::Other.class_name(), "getdatebtnhour");
    }
}
