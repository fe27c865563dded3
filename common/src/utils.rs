use crate::constants::EARTH_RADIUS_KM;
use crate::types::lat_lng::LatLng;
use crate::types::shop::Shop;

/// Great-circle distance in kilometres (haversine).
pub fn calculate_distance(point1: LatLng, point2: LatLng) -> f64 {
    let (lat1, lat2) = (point1.lat.to_radians(), point2.lat.to_radians());
    let dlat = (point2.lat - point1.lat).to_radians();
    let dlng = (point2.lng - point1.lng).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Case-insensitive substring match against name and address.
/// An empty or whitespace query matches everything.
pub fn matches_query(shop: &Shop, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    shop.name.to_lowercase().contains(&needle) || shop.address.to_lowercase().contains(&needle)
}

/// Context string handed to the assistant: one line per known shop.
pub fn summarize_shops(shops: &[Shop]) -> String {
    shops
        .iter()
        .map(|shop| {
            let kind = if shop.is_vendor { "vendor" } else { "landmark" };
            format!("- {} ({}) at {}", shop.name, kind, shop.address)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
