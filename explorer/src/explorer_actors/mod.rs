pub mod app_controller;
pub mod map_adapter;
pub mod ui_handler;
