//! Loads the dealership catalog: inventory cars, showcase slides, and the
//! links from each showcase slide to the car shown on its detail page.
//!
//! A copy of the catalog is bundled with the crate (`data/catalog.json`); a
//! file configured through `catalog_path` replaces it wholesale.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::errors::CatalogError;
use crate::model::{Car, ShowcaseCar};
use crate::showcase::SlideSequence;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// The static data behind the site.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub cars: Vec<Car>,
    pub showcase: Vec<ShowcaseCar>,
    /// Showcase slide id to inventory car id.
    #[serde(default)]
    pub showcase_links: HashMap<String, u32>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    ///
    /// # Errors
    /// Only fails if the bundled JSON is malformed.
    #[must_use = "parsing the catalog can fail, the Result must be handled"]
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses and checks a catalog document.
    ///
    /// # Errors
    /// `SerdeJson` for malformed input, `UnknownCar` when a showcase link
    /// points at a car id that is not in `cars`.
    #[must_use = "parsing the catalog can fail, the Result must be handled"]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.check_links()?;
        debug!(
            "Parsed catalog: {} car(s), {} showcase slide(s), {} link(s).",
            catalog.cars.len(),
            catalog.showcase.len(),
            catalog.showcase_links.len()
        );
        Ok(catalog)
    }

    fn check_links(&self) -> Result<(), CatalogError> {
        for (showcase_id, car_id) in &self.showcase_links {
            if self.car(*car_id).is_none() {
                return Err(CatalogError::UnknownCar {
                    showcase_id: showcase_id.clone(),
                    car_id: *car_id,
                });
            }
            if !self.showcase.iter().any(|slide| &slide.id == showcase_id) {
                warn!("Showcase link '{}' does not match any showcase slide.", showcase_id);
            }
        }
        Ok(())
    }

    pub fn car(&self, id: u32) -> Option<&Car> {
        self.cars.iter().find(|car| car.id == id)
    }

    pub fn featured(&self) -> impl Iterator<Item = &Car> {
        self.cars.iter().filter(|car| car.featured)
    }

    /// The inventory car whose detail page a showcase slide leads to.
    pub fn detail_for_showcase(&self, showcase_id: &str) -> Option<&Car> {
        self.showcase_links
            .get(showcase_id)
            .and_then(|car_id| self.car(*car_id))
    }

    /// Showcase slides in display order.
    ///
    /// # Errors
    /// `EmptySequence` when the catalog has no showcase slides.
    #[must_use = "building a sequence can fail, the Result must be handled"]
    pub fn slide_sequence(&self) -> Result<Arc<SlideSequence<ShowcaseCar>>, CatalogError> {
        SlideSequence::new(self.showcase.clone()).map(Arc::new)
    }
}

/// Loads a catalog from a JSON file.
///
/// # Errors
/// `Io` if the file cannot be read, otherwise as [`Catalog::from_json`].
#[must_use = "loading the catalog can fail, the Result must be handled"]
pub fn load_catalog(path: &str) -> Result<Catalog, CatalogError> {
    info!("Loading catalog from: {}", path);
    let json = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_json(&json)?;
    info!(
        "Catalog loaded from {}: {} car(s), {} showcase slide(s).",
        path,
        catalog.cars.len(),
        catalog.showcase.len()
    );
    Ok(catalog)
}
