use crate::types::lat_lng::LatLng;

/// Default focus of the map: Madurai city centre.
pub const DEFAULT_CENTER: LatLng = LatLng::new(9.9252, 78.1198);

/// Fixed key of the durable vendor record. The file on disk is `<key>.json`.
pub const VENDOR_STORAGE_KEY: &str = "street_food_vendors";
pub const APP_DIR_NAME: &str = "street-food-explorer";

pub const VENDOR_ID_PREFIX: &str = "vendor-";
pub const LEGEND_ID_PREFIX: &str = "legend-";

pub const GREETING_MESSAGE: &str =
    "Vanakkam! Pick a spot on the map or ask me where to eat nearby.";
pub const APOLOGY_MESSAGE: &str =
    "Sorry, I couldn't reach the food guide right now. Please try again in a moment.";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const NEARBY_LIMIT: usize = 5;
pub const EARTH_RADIUS_KM: f64 = 6371.0;
