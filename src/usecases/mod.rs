pub mod accounts;
pub mod auth;
pub mod error;
pub mod feed;
pub mod following;
pub mod plan_access;
pub mod plans;
pub mod subscriptions;
