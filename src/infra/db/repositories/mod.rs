pub mod accounts;
pub mod follows;
pub mod plans;
pub mod subscriptions;
