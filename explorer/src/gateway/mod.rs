use common::errors::GatewayError;
use common::types::assistant::{AssistantQuery, AssistantReply};
use std::future::Future;
use std::pin::Pin;

pub mod gemini;
pub mod offline;

pub use gemini::GeminiGateway;
pub use offline::OfflineGateway;

pub type GatewayFuture = Pin<Box<dyn Future<Output = Result<AssistantReply, GatewayError>>>>;

/// The hosted assistant. Implementations never panic on bad responses; every
/// failure comes back as a [`GatewayError`].
pub trait AssistantGateway {
    fn ask(&self, query: AssistantQuery) -> GatewayFuture;
}
