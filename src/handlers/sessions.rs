use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::booking::BookingController;
use crate::cache::SESSION_CACHE;
use crate::client::ApiClient;

/// Opens a booking form. Branches are loaded before it is handed out.
pub async fn open_session(api: &ApiClient) -> (Uuid, Arc<BookingController>) {
    let controller = Arc::new(BookingController::open(api.clone()).await);
    let id = Uuid::new_v4();
    SESSION_CACHE.insert(id, controller.clone()).await;
    info!("opened booking session {}", id);
    (id, controller)
}

pub async fn find_session(id: Uuid) -> Option<Arc<BookingController>> {
    SESSION_CACHE.get(&id).await
}

/// Live session count. Pending cache maintenance runs first so the count
/// reflects the latest inserts and expiries.
pub async fn open_sessions() -> u64 {
    SESSION_CACHE.run_pending_tasks().await;
    SESSION_CACHE.entry_count()
}
