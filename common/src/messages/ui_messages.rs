use crate::types::app_state::AppSnapshot;
use actix::prelude::*;

/// Controller → UI: current state after a change.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Render(pub AppSnapshot);
