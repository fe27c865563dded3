use crate::types::lat_lng::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a vendor is currently serving. Legend shops carry no status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Online,
    Offline,
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendorStatus::Online => write!(f, "online"),
            VendorStatus::Offline => write!(f, "offline"),
        }
    }
}

impl FromStr for VendorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" | "on" => Ok(VendorStatus::Online),
            "offline" | "off" => Ok(VendorStatus::Offline),
            other => Err(format!("'{other}' is not a vendor status (online/offline)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
}

/// A point of interest: a fixed legend entry or a registered vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coords: LatLng,
    pub is_vendor: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VendorStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<MenuItem>>,
}

impl Shop {
    pub fn legend(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        coords: LatLng,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            coords,
            is_vendor: false,
            status: None,
            menu: None,
        }
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        self.menu.as_deref().unwrap_or_default()
    }
}
