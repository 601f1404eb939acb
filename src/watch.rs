use crate::dates;
use crate::errors::AppResult;
use crate::finder::AppointmentFinder;
use crate::notifier::WhatsAppNotifier;
use crate::parser::SlotType;
use std::time::Duration;
use tracing::info;

/// Watches a set of offices for any appointment date before the cutoff.
///
/// Sweeps every office, notifies all registered phones on a hit, sleeps for
/// `interval` and repeats forever. The first error anywhere in a sweep
/// propagates to the caller, which is expected to report it once and exit.
pub async fn watch_available_dates(
    finder: &AppointmentFinder,
    notifier: &WhatsAppNotifier,
    search_before: &str,
    interval: Duration,
) -> AppResult<()> {
    loop {
        let offices: Vec<String> = finder.offices().map(str::to_string).collect();
        for office in &offices {
            let early_dates = finder.find_available_dates(office, search_before).await?;

            if !early_dates.is_empty() {
                info!(office = %office, dates = ?early_dates, "Next available date");
                let message =
                    format!("{office} There is a free slot, be fast! {early_dates:?}");
                notify_all(notifier, &message).await?;
            }
        }

        info!(seconds = interval.as_secs(), "Sleeping until next sweep");
        tokio::time::sleep(interval).await;
    }
}

/// Watches one office for open time slots of a given type, day by day.
///
/// Each cycle walks every date from today through `until`, queries the slot
/// availability for that date, and notifies all registered phones on a hit.
pub async fn watch_free_slots(
    finder: &AppointmentFinder,
    notifier: &WhatsAppNotifier,
    office: &str,
    until: &str,
    slot_type: SlotType,
    interval: Duration,
) -> AppResult<()> {
    loop {
        let dates_to_check = dates::date_range(dates::TODAY, until)?;

        for date in &dates_to_check {
            let free_slots = finder.check_for_date(office, date, slot_type).await?;

            if !free_slots.is_empty() {
                info!(office = office, date = %date, slots = ?free_slots, "Free time slots");
                let message = format!("Free time slots in {office}, be quick! {free_slots:?}");
                notify_all(notifier, &message).await?;
            }
        }

        info!(seconds = interval.as_secs(), "Sleeping until next sweep");
        tokio::time::sleep(interval).await;
    }
}

/// Sends one message to every registered phone.
async fn notify_all(notifier: &WhatsAppNotifier, message: &str) -> AppResult<()> {
    let phones: Vec<String> = notifier.phones().map(str::to_string).collect();
    for phone in &phones {
        // A gateway refusal comes back as Ok(false) and is already logged;
        // only a missing API key aborts the watch.
        notifier.send(phone, message).await?;
    }
    Ok(())
}

/// Reports a watch failure to the first registered phone, best effort.
pub async fn report_failure(notifier: &WhatsAppNotifier, watcher: &str, error: &str) {
    let Some(phone) = notifier.phones().next().map(str::to_string) else {
        return;
    };
    let message = format!("An error occured on {watcher}: {error}");
    // The process is about to exit; a second failure here is only logged.
    let _ = notifier.send(&phone, &message).await;
}
