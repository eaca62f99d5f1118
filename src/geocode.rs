// src/geocode.rs
//! Geocoding collaborator: place name → optional (latitude, longitude).
//!
//! The cache is an explicit bounded map owned here, not an ambient
//! process-wide memo, and the throttle is a minimum interval between live
//! lookups. Identical place strings after warm-up never re-issue a call.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::error::Error;
use crate::quirks;
use crate::table::{Table, Value};

pub const BIRTH_PLACE_LATITUDE: &str = "Birth Place Latitude";
pub const BIRTH_PLACE_LONGITUDE: &str = "Birth Place Longitude";

const CACHE_CAPACITY: usize = 64;
const MIN_INTERVAL: Duration = Duration::from_secs(1);
const COUNTRY: &str = "USA";

pub trait Geocoder {
    fn lookup(&mut self, query: &str) -> Result<Option<(f64, f64)>, Error>;
}

/// Historical place strings carry qualifiers the geocoder cannot resolve:
/// a "(now …)" parenthetical names the modern place, a "near …" clause names
/// the nearest mappable one, and two places need the hardcoded renames from
/// the quirks table. The fixed country qualifier is always appended.
pub fn adjust_place(place: &str) -> String {
    let adjusted = if let Some((_, rest)) = place.split_once("(now") {
        rest.replace(')', " ")
    } else if let Some((_, rest)) = place.split_once("near") {
        rest.replace(')', " ")
    } else if let Some(&(_, renamed)) =
        quirks::PLACE_RENAMES.iter().find(|(pattern, _)| place.contains(pattern))
    {
        s!(renamed)
    } else {
        s!(place)
    };
    format!("{}, {COUNTRY}", adjusted.trim())
}

pub struct GeocodeCache<G> {
    inner: G,
    capacity: usize,
    min_interval: Duration,
    last_call: Option<Instant>,
    cache: HashMap<String, Option<(f64, f64)>>,
    insertion_order: VecDeque<String>,
}

impl<G: Geocoder> GeocodeCache<G> {
    pub fn new(inner: G) -> Self {
        Self::with_limits(inner, CACHE_CAPACITY, MIN_INTERVAL)
    }

    pub fn with_limits(inner: G, capacity: usize, min_interval: Duration) -> Self {
        GeocodeCache {
            inner,
            capacity,
            min_interval,
            last_call: None,
            cache: HashMap::new(),
            insertion_order: VecDeque::new(),
        }
    }

    /// Resolve one place, consulting the cache first. Negative results are
    /// cached too — a place the geocoder cannot find stays unfindable for
    /// the rest of the run.
    pub fn locate(&mut self, place: &str) -> Result<Option<(f64, f64)>, Error> {
        let query = adjust_place(place);
        if let Some(hit) = self.cache.get(&query) {
            return Ok(*hit);
        }

        if let Some(last) = self.last_call {
            let since = last.elapsed();
            if since < self.min_interval {
                std::thread::sleep(self.min_interval - since);
            }
        }
        let result = self.inner.lookup(&query)?;
        self.last_call = Some(Instant::now());

        if self.cache.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.cache.remove(&oldest);
            }
        }
        self.cache.insert(query.clone(), result);
        self.insertion_order.push_back(query);
        Ok(result)
    }
}

/// Append Birth Place Latitude/Longitude columns to the president table.
pub fn add_birth_place_locations<G: Geocoder>(
    table: &mut Table,
    cache: &mut GeocodeCache<G>,
) -> Result<(), Error> {
    table.add_column(BIRTH_PLACE_LATITUDE)?;
    table.add_column(BIRTH_PLACE_LONGITUDE)?;
    for id in table.ids().to_vec() {
        let Some(place) = table.get(&id, "Birth Place").and_then(Value::as_str) else {
            continue;
        };
        let place = s!(place);
        match cache.locate(&place)? {
            Some((latitude, longitude)) => {
                table.set(&id, BIRTH_PLACE_LATITUDE, Value::Float(latitude))?;
                table.set(&id, BIRTH_PLACE_LONGITUDE, Value::Float(longitude))?;
            }
            None => tracing::warn!(%id, %place, "birth place could not be geocoded"),
        }
    }
    Ok(())
}

/* ---------------- Live backend ---------------- */

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("prez_scrape/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Fetch { url: s!(NOMINATIM_URL), reason: e.to_string() })?;
        Ok(NominatimGeocoder { client })
    }
}

impl Geocoder for NominatimGeocoder {
    fn lookup(&mut self, query: &str) -> Result<Option<(f64, f64)>, Error> {
        let fetch_err =
            |reason: String| Error::Fetch { url: s!(NOMINATIM_URL), reason };
        let body = self
            .client
            .get(NOMINATIM_URL)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|e| fetch_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| fetch_err(e.to_string()))?
            .text()
            .map_err(|e| fetch_err(e.to_string()))?;

        let results: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| fetch_err(e.to_string()))?;
        let coords = results.get(0).and_then(|hit| {
            let latitude = hit.get("lat")?.as_str()?.parse::<f64>().ok()?;
            let longitude = hit.get("lon")?.as_str()?.parse::<f64>().ok()?;
            Some((latitude, longitude))
        });
        Ok(coords)
    }
}
