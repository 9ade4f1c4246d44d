use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Product {
    pub id: Uuid,
    pub household_id: Uuid,
    pub name: String,
    pub emoji: String,
    pub category_id: Option<Uuid>,
    pub frequency_correction_factor: Option<f64>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub household_id: Uuid,
    pub name: &'a str,
    pub emoji: &'a str,
    pub category_id: Option<Uuid>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_snoozes)]
pub struct NewProductSnooze {
    pub household_id: Uuid,
    pub product_id: Uuid,
    pub snoozed_until: DateTime<Utc>,
}

/// The authenticated user behind a session.
#[derive(Queryable, Debug, Clone, Copy)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub household_id: Option<Uuid>,
}
