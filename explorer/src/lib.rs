pub mod commands;
pub mod config;
pub mod explorer_actors;
pub mod gateway;
pub mod messages;
pub mod state;

#[cfg(test)]
mod test_support;
