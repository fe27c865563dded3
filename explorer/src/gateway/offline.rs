use crate::gateway::{AssistantGateway, GatewayFuture};
use common::errors::GatewayError;
use common::types::assistant::AssistantQuery;
use std::future::ready;

/// Stand-in used when no API key is configured.
pub struct OfflineGateway;

impl AssistantGateway for OfflineGateway {
    fn ask(&self, _query: AssistantQuery) -> GatewayFuture {
        Box::pin(ready(Err(GatewayError::Unavailable)))
    }
}
