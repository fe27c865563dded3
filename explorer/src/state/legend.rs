use common::constants::LEGEND_ID_PREFIX;
use common::types::lat_lng::LatLng;
use common::types::shop::Shop;

/// The curated street-food landmarks shipped with the app, in display order.
pub fn legend_shops() -> Vec<Shop> {
    [
        ("Amma Mess", "Alagar Kovil Main Rd, Tallakulam, Madurai", 9.9403, 78.1367),
        ("Murugan Idli Shop", "West Masi St, Madurai", 9.9195, 78.1149),
        ("Konar Kadai", "Simmakkal, Madurai", 9.9262, 78.1213),
        ("Famous Jigarthanda", "East Marret St, Madurai", 9.9167, 78.1230),
        ("Kumar Mess", "Chinna Chokkikulam, Madurai", 9.9340, 78.1400),
        ("Sree Sabarees", "Periyar Bus Stand, Madurai", 9.9160, 78.1130),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, address, lat, lng))| {
        Shop::legend(
            format!("{LEGEND_ID_PREFIX}{}", i + 1),
            name,
            address,
            LatLng::new(lat, lng),
        )
    })
    .collect()
}
