pub mod app_state;
pub mod assistant;
pub mod chat_message;
pub mod lat_lng;
pub mod shop;
