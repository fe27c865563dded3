use crate::errors::{ChatError, GeoStoreError};
use crate::messages::map_messages::SyncMap;
use crate::messages::ui_messages::Render;
use crate::types::app_state::{AppSnapshot, ShopListing};
use crate::types::chat_message::MessageId;
use crate::types::lat_lng::LatLng;
use crate::types::shop::{MenuItem, Shop, VendorStatus};
use actix::prelude::*;

/// Chat text typed by the user. Blank text is rejected with
/// [`ChatError::EmptyInput`] and nothing is appended.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<MessageId, ChatError>")]
pub struct SubmitChat {
    pub text: String,
}

/// Closes the shop detail view.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Deselect;

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct OpenRegistration;

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct CancelRegistration;

/// Submission of the vendor registration form.
///
/// ## Contents
/// - `coords`: where to place the vendor; `None` uses the location cursor.
/// - `menu`: rows with a blank name are dropped.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Shop, GeoStoreError>")]
pub struct RegisterVendor {
    pub name: String,
    pub address: String,
    pub coords: Option<LatLng>,
    pub menu: Vec<MenuItem>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Shop, GeoStoreError>")]
pub struct SetVendorStatus {
    pub shop_id: String,
    pub status: VendorStatus,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "ShopListing")]
pub struct FilterShops {
    pub query: String,
}

/// Shops closest to the location cursor, nearest first.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Vec<Shop>")]
pub struct NearbyShops {
    pub limit: usize,
}

/// Empties the conversation. Replies still in flight are discarded.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct ClearChat;

#[derive(Message, Debug, Clone)]
#[rtype(result = "AppSnapshot")]
pub struct GetSnapshot;

/// Wires the views that observe the controller. Either may be absent.
#[derive(Message)]
#[rtype(result = "()")]
pub struct AttachViews {
    pub map: Option<Recipient<SyncMap>>,
    pub ui: Option<Recipient<Render>>,
}
