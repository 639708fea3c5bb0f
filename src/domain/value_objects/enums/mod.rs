pub mod feed_sources;
pub mod roles;
