use crate::client::BookingClient;
use crate::constants::*;
use crate::dates;
use crate::errors::{AppError, AppResult};
use crate::parser::{self, SlotType};
use std::collections::BTreeMap;
use tracing::{debug, info};
use url::Url;

/// Fixed identifiers sent with every appointment query.
#[derive(Debug, Clone)]
pub struct QueryDefaults {
    pub consular_id: u32,
    pub service_type_id: u32,
    pub calendar_type: u32,
    pub total_person: u32,
    pub personal_info: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            consular_id: DEFAULT_CONSULAR_ID,
            service_type_id: DEFAULT_SERVICE_TYPE_ID,
            calendar_type: DEFAULT_CALENDAR_TYPE,
            total_person: DEFAULT_TOTAL_PERSON,
            personal_info: DEFAULT_PERSONAL_INFO.to_string(),
        }
    }
}

/// Searches the booking site for open appointment dates and time slots.
///
/// Offices must be registered by name before they can be queried. Every query
/// opens a fresh [`BookingClient`] scoped to that call, so tokens and the
/// connection pool never outlive a single unit of work.
pub struct AppointmentFinder {
    base: Url,
    offices: BTreeMap<String, u32>,
    defaults: QueryDefaults,
}

impl AppointmentFinder {
    pub fn new() -> AppResult<Self> {
        Ok(Self::with_base_url(Url::parse(BOOKING_BASE_URL)?))
    }

    /// Uses a non-default booking site URL. Exists for tests against a mock.
    pub fn with_base_url(base: Url) -> Self {
        Self {
            base,
            offices: BTreeMap::new(),
            defaults: QueryDefaults::default(),
        }
    }

    /// Registers an office name and its exit id for later queries.
    pub fn add_office(&mut self, name: &str, exit_id: u32) {
        self.offices.insert(name.to_string(), exit_id);
    }

    /// Registered office names, in stable sorted order.
    pub fn offices(&self) -> impl Iterator<Item = &str> {
        self.offices.keys().map(String::as_str)
    }

    fn exit_id(&self, office: &str) -> AppResult<u32> {
        self.offices
            .get(office)
            .copied()
            .ok_or_else(|| AppError::UnknownOffice(office.to_string()))
    }

    /// Finds the available dates for an office that fall strictly before
    /// `search_before`.
    ///
    /// Returns an empty list when the office has no openings at all or none
    /// early enough; both are expected outcomes, not errors.
    pub async fn find_available_dates(
        &self,
        office: &str,
        search_before: &str,
    ) -> AppResult<Vec<String>> {
        let exit_id = self.exit_id(office)?;

        let client = BookingClient::connect_to(self.base.clone()).await?;
        let response = client
            .get_date(
                self.defaults.consular_id,
                exit_id,
                self.defaults.service_type_id,
                self.defaults.calendar_type,
                self.defaults.total_person,
            )
            .await?;

        let available_dates = parser::parse_available_dates(&response);
        debug!(office = office, dates = ?available_dates, "Available dates");

        if available_dates.is_empty() {
            info!(office = office, "No available dates");
            return Ok(Vec::new());
        }

        let early_dates = dates::filter_before(&available_dates, search_before)?;
        if early_dates.is_empty() {
            info!(office = office, "No available dates before cutoff");
            return Ok(Vec::new());
        }

        info!(office = office, dates = ?early_dates, "[FOUND AVAILABLE DATE]");
        Ok(early_dates)
    }

    /// Checks whether a specific date still has open slots of the given type.
    pub async fn check_for_date(
        &self,
        office: &str,
        date: &str,
        slot_type: SlotType,
    ) -> AppResult<Vec<String>> {
        let exit_id = self.exit_id(office)?;

        let client = BookingClient::connect_to(self.base.clone()).await?;
        let response = client
            .send_date(
                date,
                self.defaults.total_person,
                self.defaults.consular_id,
                exit_id,
                self.defaults.calendar_type,
                self.defaults.service_type_id,
                &self.defaults.personal_info,
            )
            .await?;

        let available_hours = parser::parse_available_hours(&response, slot_type);
        if available_hours.is_empty() {
            info!(office = office, date = date, "No free time slots");
            return Ok(Vec::new());
        }

        info!(office = office, date = date, hours = ?available_hours, "[FOUND TIME SLOT]");
        Ok(available_hours)
    }
}
