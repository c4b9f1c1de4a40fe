//! Read-only reference data: store locations, open positions, and weekly
//! store hours. Loaded once per form session and once per dashboard load;
//! the two surfaces never share a cache.

use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use crate::models::reference::{PositionRow, StoreHourRow, StoreRow};

/// Snapshot of the reference tables. Each slot is filled by its own query;
/// a failed query leaves its slot empty and does not affect the others.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceData {
    pub stores: Vec<StoreRow>,
    pub positions: Vec<PositionRow>,
    pub store_hours: Vec<StoreHourRow>,
}

/// Loads the option lists offered by the public form: active stores and
/// positions in display order, plus all store hours in day order.
///
/// The three queries run concurrently. Failures degrade to an empty option
/// list (logged, never surfaced to the visitor) — no retries.
pub async fn load_form_reference(pool: &PgPool) -> ReferenceData {
    let (stores, positions, store_hours) = tokio::join!(
        sqlx::query_as::<_, StoreRow>(
            "SELECT * FROM stores WHERE is_active = true ORDER BY display_order",
        )
        .fetch_all(pool),
        sqlx::query_as::<_, PositionRow>(
            "SELECT * FROM positions WHERE is_active = true ORDER BY display_order",
        )
        .fetch_all(pool),
        sqlx::query_as::<_, StoreHourRow>("SELECT * FROM store_hours ORDER BY day_order")
            .fetch_all(pool),
    );

    ReferenceData {
        stores: slot("stores", stores),
        positions: slot("positions", positions),
        store_hours: slot("store_hours", store_hours),
    }
}

/// Loads the reference sets the admin surface joins against. Unlike the form,
/// stores and positions are NOT filtered by `is_active`: the dashboard must
/// resolve ids on applications that reference since-deactivated rows. Store
/// hours are not used by the dashboard and are left empty.
pub async fn load_admin_reference(pool: &PgPool) -> ReferenceData {
    let (stores, positions) = tokio::join!(
        sqlx::query_as::<_, StoreRow>("SELECT * FROM stores").fetch_all(pool),
        sqlx::query_as::<_, PositionRow>("SELECT * FROM positions").fetch_all(pool),
    );

    ReferenceData {
        stores: slot("stores", stores),
        positions: slot("positions", positions),
        store_hours: Vec::new(),
    }
}

fn slot<T>(name: &str, result: Result<Vec<T>, sqlx::Error>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Failed to load {name} reference data: {e}");
            Vec::new()
        }
    }
}
