pub mod chat_log;
pub mod geo_store;
pub mod legend;
pub mod location_cursor;
pub mod vendor_repository;
