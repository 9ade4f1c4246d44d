use crate::db::DbPool;
use crate::models::SessionUser;
use crate::schema::{sessions, users};
use chrono::Utc;
use diesel::prelude::*;

use super::crypto::hash_token;

pub async fn get_user_from_token(pool: &DbPool, token: &str) -> Option<SessionUser> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .filter(users::deleted_at.is_null())
        .select((users::id, users::household_id))
        .first::<SessionUser>(&mut conn)
        .ok()
}
