use moka::future::Cache;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::booking::BookingController;

const MAX_SESSIONS: u64 = 10_000;
const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Open booking forms, dropped after sitting idle.
pub static SESSION_CACHE: Lazy<Arc<Cache<Uuid, Arc<BookingController>>>> = Lazy::new(|| {
    Arc::new(
        Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(SESSION_IDLE_TIMEOUT)
            .build(),
    )
});
