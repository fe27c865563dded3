use crate::state::vendor_repository::VendorRepository;
use common::constants::VENDOR_ID_PREFIX;
use common::errors::{GeoStoreError, RegistrationField, ValidationError};
use common::logger::Logger;
use common::types::app_state::ShopListing;
use common::types::lat_lng::LatLng;
use common::types::shop::{MenuItem, Shop, VendorStatus};
use common::utils::{calculate_distance, matches_query, summarize_shops};
use std::collections::HashSet;
use uuid::Uuid;

/// The set of known shops: the fixed legend list followed by registered
/// vendors in insertion order.
///
/// ## Responsibilities:
/// - Validate and register new vendors.
/// - Keep the durable vendor record in step with memory. Every mutation is
///   written before the call returns.
/// - Answer listing, filtering and proximity queries.
pub struct GeoStore {
    legend: Vec<Shop>,
    vendors: Vec<Shop>,
    repository: VendorRepository,
    logger: Logger,
}

impl GeoStore {
    /// Builds the store and loads persisted vendors. An unreadable record is
    /// treated as empty.
    pub fn open(legend: Vec<Shop>, repository: VendorRepository, logger: Logger) -> Self {
        let stored = match repository.load() {
            Ok(vendors) => vendors,
            Err(e) => {
                logger.warn(format!(
                    "Ignoring unreadable vendor record at {}: {}",
                    repository.path().display(),
                    e
                ));
                Vec::new()
            }
        };

        let mut seen: HashSet<String> = legend.iter().map(|s| s.id.clone()).collect();
        let mut vendors = Vec::with_capacity(stored.len());
        for mut shop in stored {
            if !seen.insert(shop.id.clone()) {
                logger.warn(format!("Dropping stored vendor with duplicate id '{}'", shop.id));
                continue;
            }
            // Everything in the record was registered through the form.
            if !shop.is_vendor || shop.status.is_none() {
                logger.warn(format!("Stored vendor '{}' repaired on load", shop.id));
                shop.is_vendor = true;
                shop.status.get_or_insert(VendorStatus::Online);
            }
            vendors.push(shop);
        }

        logger.info(format!(
            "Loaded {} legend shops and {} vendors",
            legend.len(),
            vendors.len()
        ));

        Self {
            legend,
            vendors,
            repository,
            logger,
        }
    }

    pub fn legend(&self) -> &[Shop] {
        &self.legend
    }

    pub fn vendors(&self) -> &[Shop] {
        &self.vendors
    }

    pub fn list_all(&self) -> Vec<Shop> {
        self.legend.iter().chain(self.vendors.iter()).cloned().collect()
    }

    pub fn find(&self, id: &str) -> Option<&Shop> {
        self.legend
            .iter()
            .chain(self.vendors.iter())
            .find(|shop| shop.id == id)
    }

    /// Registers a new vendor at `coords` and persists the vendor list.
    ///
    /// ## Errors
    /// - [`GeoStoreError::Validation`] when the name or address is blank.
    /// - [`GeoStoreError::Storage`] when the record cannot be written; the
    ///   vendor is not kept in that case.
    pub fn register(
        &mut self,
        name: &str,
        address: &str,
        coords: LatLng,
        menu: Vec<MenuItem>,
    ) -> Result<Shop, GeoStoreError> {
        let name = name.trim();
        let address = address.trim();
        if name.is_empty() {
            return Err(ValidationError::required(RegistrationField::Name).into());
        }
        if address.is_empty() {
            return Err(ValidationError::required(RegistrationField::Address).into());
        }

        let menu: Vec<MenuItem> = menu
            .into_iter()
            .filter(|item| !item.name.trim().is_empty())
            .map(|item| MenuItem {
                name: item.name.trim().to_string(),
                price: item.price,
            })
            .collect();

        let shop = Shop {
            id: self.fresh_id(),
            name: name.to_string(),
            address: address.to_string(),
            coords,
            is_vendor: true,
            status: Some(VendorStatus::Online),
            menu: Some(menu),
        };

        self.vendors.push(shop.clone());
        if let Err(e) = self.repository.save(&self.vendors) {
            self.vendors.pop();
            self.logger.error(format!("Could not persist vendor '{}': {}", shop.name, e));
            return Err(e.into());
        }

        self.logger
            .info(format!("Registered vendor '{}' as {}", shop.name, shop.id));
        Ok(shop)
    }

    /// Changes a vendor's status. Legend shops have no status to change.
    pub fn set_status(&mut self, id: &str, status: VendorStatus) -> Result<Shop, GeoStoreError> {
        if self.legend.iter().any(|shop| shop.id == id) {
            return Err(GeoStoreError::NotAVendor(id.to_string()));
        }
        let index = self
            .vendors
            .iter()
            .position(|shop| shop.id == id)
            .ok_or_else(|| GeoStoreError::UnknownShop(id.to_string()))?;

        let previous = self.vendors[index].status.replace(status);
        if let Err(e) = self.repository.save(&self.vendors) {
            self.vendors[index].status = previous;
            return Err(e.into());
        }
        Ok(self.vendors[index].clone())
    }

    /// Case-insensitive substring filter on name and address. Legend and
    /// vendor lists are filtered independently, each keeping its order.
    pub fn filter(&self, query: &str) -> ShopListing {
        let pick = |shops: &[Shop]| -> Vec<Shop> {
            shops
                .iter()
                .filter(|shop| matches_query(shop, query))
                .cloned()
                .collect()
        };
        ShopListing {
            legend: pick(&self.legend),
            vendors: pick(&self.vendors),
        }
    }

    /// Up to `limit` shops ordered by distance from `coords`.
    pub fn nearest(&self, coords: LatLng, limit: usize) -> Vec<Shop> {
        let mut by_distance: Vec<(f64, &Shop)> = self
            .legend
            .iter()
            .chain(self.vendors.iter())
            .map(|shop| (calculate_distance(shop.coords, coords), shop))
            .collect();
        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
        by_distance
            .into_iter()
            .take(limit)
            .map(|(_, shop)| shop.clone())
            .collect()
    }

    /// Context string for the assistant.
    pub fn context_summary(&self) -> String {
        summarize_shops(&self.list_all())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = format!("{VENDOR_ID_PREFIX}{}", Uuid::new_v4());
            if self.find(&id).is_none() {
                return id;
            }
        }
    }
}
