use actix::Message;

/// A raw line typed by the user, delivered to the `UIHandler`.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct UserInput(pub String);
