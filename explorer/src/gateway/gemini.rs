use crate::gateway::{AssistantGateway, GatewayFuture};
use common::errors::GatewayError;
use common::types::assistant::{AssistantQuery, AssistantReply};
use common::types::chat_message::Citation;
use serde_json::{Value, json};
use std::collections::HashSet;

const SYSTEM_INSTRUCTION: &str = "You are a friendly local guide for street food. \
Answer briefly, mention concrete dishes and prices when you know them, \
and prefer places close to the user's location.";

/// Google Gemini `generateContent` client with Maps grounding.
#[derive(Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiGateway {
    pub fn new(api_key: String, model: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            endpoint,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// JSON body for one question: prompt plus location and known shops, with
/// the location also handed to Maps grounding.
pub fn request_body(query: &AssistantQuery) -> Value {
    let text = format!(
        "{}\n\nMy current location: {}\nSpots I already know about:\n{}",
        query.prompt, query.location, query.context
    );
    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": [{ "text": text }] }],
        "tools": [{ "googleMaps": {} }],
        "toolConfig": {
            "retrievalConfig": {
                "latLng": {
                    "latitude": query.location.lat,
                    "longitude": query.location.lng
                }
            }
        }
    })
}

/// Pulls the answer text and grounding links out of a response body.
pub fn parse_reply(body: &Value) -> Result<AssistantReply, GatewayError> {
    let candidate = body["candidates"]
        .get(0)
        .ok_or_else(|| GatewayError::Parse("response has no candidates".into()))?;

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }

    let mut seen = HashSet::new();
    let citations = candidate["groundingMetadata"]["groundingChunks"]
        .as_array()
        .map(|chunks| chunks.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|chunk| {
            let source = chunk.get("maps").or_else(|| chunk.get("web"))?;
            let uri = source["uri"].as_str()?.to_string();
            let title = source["title"].as_str().unwrap_or(&uri).to_string();
            Some(Citation { title, uri })
        })
        .filter(|citation| seen.insert(citation.uri.clone()))
        .collect();

    Ok(AssistantReply {
        text: text.to_string(),
        citations,
    })
}

impl AssistantGateway for GeminiGateway {
    fn ask(&self, query: AssistantQuery) -> GatewayFuture {
        let request = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(&query));

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::Network(e.to_string()))?;

            if !response.status().is_success() {
                return Err(GatewayError::Status(response.status().as_u16()));
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| GatewayError::Parse(e.to_string()))?;
            parse_reply(&body)
        })
    }
}
