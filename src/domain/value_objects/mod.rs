pub mod accounts;
pub mod enums;
pub mod feed;
pub mod plans;
pub mod subscriptions;
pub mod unique_insert;
