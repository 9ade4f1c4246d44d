//! Postgres-backed storage for the purchase-cadence corrector.

use boodschappen_core::{CadenceStore, ProductCadence, ProductSnooze, SnoozeError, StoreError};
use diesel::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use crate::models::NewProductSnooze;
use crate::schema::{product_snoozes, products};

pub struct PgCadenceStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PgCadenceStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl CadenceStore for PgCadenceStore<'_> {
    fn find_product(
        &mut self,
        household_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<ProductCadence>, StoreError> {
        products::table
            .filter(products::id.eq(product_id))
            .filter(products::household_id.eq(household_id))
            .select(products::frequency_correction_factor)
            .first::<Option<f64>>(&mut *self.conn)
            .optional()
            .map(|row| {
                row.map(|factor| ProductCadence {
                    frequency_correction_factor: factor,
                })
            })
            .map_err(StoreError::new)
    }

    fn upsert_snooze(&mut self, snooze: &ProductSnooze) -> Result<(), StoreError> {
        let row = NewProductSnooze {
            household_id: snooze.household_id,
            product_id: snooze.product_id,
            snoozed_until: snooze.snoozed_until,
        };

        diesel::insert_into(product_snoozes::table)
            .values(&row)
            .on_conflict((product_snoozes::household_id, product_snoozes::product_id))
            .do_update()
            .set(product_snoozes::snoozed_until.eq(snooze.snoozed_until))
            .execute(&mut *self.conn)
            .map(|_| ())
            .map_err(StoreError::new)
    }

    fn set_correction_factor(
        &mut self,
        household_id: Uuid,
        product_id: Uuid,
        factor: f64,
    ) -> Result<(), StoreError> {
        diesel::update(
            products::table
                .filter(products::id.eq(product_id))
                .filter(products::household_id.eq(household_id)),
        )
        .set(products::frequency_correction_factor.eq(Some(factor)))
        .execute(&mut *self.conn)
        .map(|_| ())
        .map_err(StoreError::new)
    }
}

/// Error type for running a snooze inside a diesel transaction.
#[derive(Error, Debug)]
pub enum SnoozeTxError {
    #[error(transparent)]
    Snooze(#[from] SnoozeError),

    #[error("Transaction failed: {0}")]
    Transaction(#[from] diesel::result::Error),
}
