mod crypto;
mod db;
mod extractor;

pub use extractor::{HouseholdMember, SESSION_COOKIE};
