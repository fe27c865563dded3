use crate::types::chat_message::ChatMessage;
use crate::types::lat_lng::LatLng;
use crate::types::shop::Shop;
use std::fmt;

/// Where the controller's shop-selection flow currently is.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    ShopSelected(Shop),
    Registering,
}

impl ViewState {
    pub fn selected_shop(&self) -> Option<&Shop> {
        match self {
            ViewState::ShopSelected(shop) => Some(shop),
            _ => None,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => write!(f, "Idle"),
            ViewState::ShopSelected(shop) => write!(f, "Viewing {}", shop.name),
            ViewState::Registering => write!(f, "Registering a vendor"),
        }
    }
}

/// Result of a filter. Legend and vendor lists are filtered independently
/// and kept apart for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShopListing {
    pub legend: Vec<Shop>,
    pub vendors: Vec<Shop>,
}

impl ShopListing {
    pub fn is_empty(&self) -> bool {
        self.legend.is_empty() && self.vendors.is_empty()
    }
}

/// Read-only copy of the controller state, sent to the UI after each change.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub state: ViewState,
    pub cursor: LatLng,
    pub shops: Vec<Shop>,
    pub messages: Vec<ChatMessage>,
}

impl AppSnapshot {
    pub fn pending_replies(&self) -> usize {
        self.messages.iter().filter(|m| m.is_loading).count()
    }
}
