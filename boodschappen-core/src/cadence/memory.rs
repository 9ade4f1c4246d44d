use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::{CadenceStore, ProductCadence, ProductSnooze};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy)]
struct StoredProduct {
    household_id: Uuid,
    frequency_correction_factor: Option<f64>,
}

/// In-memory [`CadenceStore`] for tests and offline tools.
///
/// Writes are applied immediately and never rolled back, like two separate
/// statements without a transaction. Individual write kinds can be made to
/// fail to exercise partial-failure paths.
#[derive(Debug, Default)]
pub struct MemoryCadenceStore {
    products: HashMap<Uuid, StoredProduct>,
    snoozes: HashMap<(Uuid, Uuid), DateTime<Utc>>,
    fail_snooze_writes: bool,
    fail_factor_writes: bool,
}

impl MemoryCadenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product and return its generated id.
    pub fn insert_product(&mut self, household_id: Uuid, factor: Option<f64>) -> Uuid {
        let id = Uuid::new_v4();
        self.products.insert(
            id,
            StoredProduct {
                household_id,
                frequency_correction_factor: factor,
            },
        );
        id
    }

    pub fn correction_factor(&self, product_id: Uuid) -> Option<f64> {
        self.products
            .get(&product_id)
            .and_then(|p| p.frequency_correction_factor)
    }

    pub fn snoozed_until(&self, household_id: Uuid, product_id: Uuid) -> Option<DateTime<Utc>> {
        self.snoozes.get(&(household_id, product_id)).copied()
    }

    pub fn snooze_count(&self) -> usize {
        self.snoozes.len()
    }

    pub fn fail_snooze_writes(&mut self, fail: bool) {
        self.fail_snooze_writes = fail;
    }

    pub fn fail_factor_writes(&mut self, fail: bool) {
        self.fail_factor_writes = fail;
    }
}

impl CadenceStore for MemoryCadenceStore {
    fn find_product(
        &mut self,
        household_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<ProductCadence>, StoreError> {
        Ok(self
            .products
            .get(&product_id)
            .filter(|p| p.household_id == household_id)
            .map(|p| ProductCadence {
                frequency_correction_factor: p.frequency_correction_factor,
            }))
    }

    fn upsert_snooze(&mut self, snooze: &ProductSnooze) -> Result<(), StoreError> {
        if self.fail_snooze_writes {
            return Err(StoreError::new("snooze write rejected"));
        }
        self.snoozes.insert(
            (snooze.household_id, snooze.product_id),
            snooze.snoozed_until,
        );
        Ok(())
    }

    fn set_correction_factor(
        &mut self,
        household_id: Uuid,
        product_id: Uuid,
        factor: f64,
    ) -> Result<(), StoreError> {
        if self.fail_factor_writes {
            return Err(StoreError::new("factor write rejected"));
        }
        match self.products.get_mut(&product_id) {
            Some(p) if p.household_id == household_id => {
                p.frequency_correction_factor = Some(factor);
                Ok(())
            }
            _ => Err(StoreError::new(format!("product {} not found", product_id))),
        }
    }
}
