pub mod controller_messages;
pub mod map_messages;
pub mod ui_messages;

pub use controller_messages::*;
pub use map_messages::*;
pub use ui_messages::*;
