//! Watches the Gayrettepe office for free time slots, day by day.

use idata_slot_watch::config::WatcherConfig;
use idata_slot_watch::errors::{AppError, AppResult};
use idata_slot_watch::finder::AppointmentFinder;
use idata_slot_watch::logging;
use idata_slot_watch::notifier::WhatsAppNotifier;
use idata_slot_watch::parser::SlotType;
use idata_slot_watch::watch;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

const LOG_FILE: &str = "idata_free_slot_watch_gayrettepe.log";
const CONFIG_FILE: &str = "watch.toml";
const WATCHER_NAME: &str = "iDataFreeSlotWatch-Gayrettepe";
const OFFICE_NAME: &str = "Gayrettepe";

fn main() -> AppResult<()> {
    logging::init_file_logging(Path::new(LOG_FILE))?;

    let config = WatcherConfig::load_or_default(Path::new(CONFIG_FILE))?;

    let mut notifier = WhatsAppNotifier::new()?;
    for phone in &config.phones {
        notifier.register(&phone.number, &phone.api_key);
    }

    let rt =
        tokio::runtime::Runtime::new().map_err(|e| AppError::IoError(e.to_string()))?;

    if let Err(e) = rt.block_on(run(&config, &notifier)) {
        error!(error = %e, "An error occured");
        rt.block_on(watch::report_failure(&notifier, WATCHER_NAME, &e.to_string()));
        std::process::exit(1);
    }
    Ok(())
}

async fn run(config: &WatcherConfig, notifier: &WhatsAppNotifier) -> AppResult<()> {
    let mut finder = AppointmentFinder::new()?;
    for office in &config.offices {
        finder.add_office(&office.name, office.exit_id);
    }

    info!(watcher = WATCHER_NAME, "The watcher has been initialized");

    watch::watch_free_slots(
        &finder,
        notifier,
        OFFICE_NAME,
        &config.slot_search_until,
        SlotType::Free,
        Duration::from_secs(config.slot_poll_secs),
    )
    .await
}
