//! Purchase-cadence correction for snoozed products.
//!
//! Snoozing hides a product from the "expected soon" list for a fixed window
//! and bumps its frequency correction factor, which stretches the learned
//! purchase interval the next time the product is considered.

mod memory;

pub use memory::MemoryCadenceStore;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{SnoozeError, StoreError};

/// Length of a snooze window.
pub const SNOOZE_HOURS: i64 = 24;

/// Multiplier applied to the correction factor on every snooze.
pub const SNOOZE_CORRECTION_FACTOR: f64 = 1.05;

/// Upper bound for the correction factor.
pub const FACTOR_MAX: f64 = 2.0;

/// Factor assumed for products that have never been corrected.
pub const DEFAULT_CORRECTION_FACTOR: f64 = 1.0;

/// Cadence-relevant state of a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductCadence {
    pub frequency_correction_factor: Option<f64>,
}

/// A snooze record. At most one exists per household and product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSnooze {
    pub household_id: Uuid,
    pub product_id: Uuid,
    pub snoozed_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnoozeOutcome {
    pub product_id: Uuid,
    pub snoozed_until: DateTime<Utc>,
    pub previous_factor: f64,
    pub frequency_correction_factor: f64,
}

/// Storage operations the corrector needs.
///
/// Implementations that can run both writes in one transaction should do so;
/// the corrector itself issues them one after the other.
pub trait CadenceStore {
    /// Load a product, scoped to the household. `None` if it does not exist
    /// there.
    fn find_product(
        &mut self,
        household_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<ProductCadence>, StoreError>;

    /// Insert or replace the snooze for `(household_id, product_id)`.
    fn upsert_snooze(&mut self, snooze: &ProductSnooze) -> Result<(), StoreError>;

    fn set_correction_factor(
        &mut self,
        household_id: Uuid,
        product_id: Uuid,
        factor: f64,
    ) -> Result<(), StoreError>;
}

/// End of a snooze window started at `now`.
pub fn snoozed_until(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::hours(SNOOZE_HOURS)
}

/// Compound the factor by one snooze, capped at [`FACTOR_MAX`].
/// Missing or non-positive factors count as [`DEFAULT_CORRECTION_FACTOR`].
pub fn next_correction_factor(current: Option<f64>) -> f64 {
    let current = effective_factor(current);
    (current * SNOOZE_CORRECTION_FACTOR).min(FACTOR_MAX)
}

fn effective_factor(current: Option<f64>) -> f64 {
    current
        .filter(|f| f.is_finite() && *f > 0.0)
        .unwrap_or(DEFAULT_CORRECTION_FACTOR)
}

/// Snooze a product for the household.
///
/// Returns [`SnoozeError::NotFound`] without touching storage when the
/// product is not the household's. A failed factor update after a successful
/// snooze write is reported as [`SnoozeError::FactorWrite`]; undoing the
/// snooze is left to the store's transaction handling.
pub fn snooze<S: CadenceStore + ?Sized>(
    store: &mut S,
    household_id: Uuid,
    product_id: Uuid,
    now: DateTime<Utc>,
) -> Result<SnoozeOutcome, SnoozeError> {
    let product = store
        .find_product(household_id, product_id)
        .map_err(SnoozeError::Lookup)?
        .ok_or(SnoozeError::NotFound)?;

    let record = ProductSnooze {
        household_id,
        product_id,
        snoozed_until: snoozed_until(now),
    };
    store
        .upsert_snooze(&record)
        .map_err(SnoozeError::SnoozeWrite)?;

    let previous_factor = effective_factor(product.frequency_correction_factor);
    let factor = next_correction_factor(product.frequency_correction_factor);
    if let Err(e) = store.set_correction_factor(household_id, product_id, factor) {
        tracing::warn!(
            %product_id,
            error = %e,
            "snooze recorded but correction factor update failed"
        );
        return Err(SnoozeError::FactorWrite(e));
    }

    tracing::info!(
        %product_id,
        snoozed_until = %record.snoozed_until,
        previous_factor,
        factor,
        "product snoozed"
    );

    Ok(SnoozeOutcome {
        product_id,
        snoozed_until: record.snoozed_until,
        previous_factor,
        frequency_correction_factor: factor,
    })
}
