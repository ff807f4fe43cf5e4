//! Geocoding result cache.
//!
//! Caches resolved coordinates per address with an LRU policy, so reopening
//! the map popup for a recently shown restaurant skips the geocoding round
//! trip and renders immediately.

use crate::env::LatLng;
use lru::LruCache;
use std::num::NonZeroUsize;

/// LRU cache of address → resolved coordinates.
pub struct GeocodeCache {
    cache: LruCache<String, LatLng>,
}

impl GeocodeCache {
    /// Creates a new cache with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).expect("Capacity must be non-zero")),
        }
    }

    /// Retrieves cached coordinates for an address if present.
    pub fn get(&mut self, address: &str) -> Option<LatLng> {
        let result = self.cache.get(address).copied();
        if result.is_some() {
            log::info!("Geocode cache HIT: {}", address);
        } else {
            log::info!("Geocode cache MISS: {}", address);
        }
        result
    }

    /// Stores resolved coordinates for an address.
    pub fn put(&mut self, address: String, coords: LatLng) {
        log::info!(
            "Geocode cache PUT: {} ({}, {})",
            address,
            coords.lat,
            coords.lng
        );
        self.cache.put(address, coords);
    }

    /// Checks whether an address is cached.
    pub fn contains(&mut self, address: &str) -> bool {
        self.cache.contains(address)
    }
}
