//! Inventory search and filtering.
//!
//! A query combines a case-insensitive free-text search over name, brand and
//! model with an exact brand filter and a price band. Empty criteria match
//! everything.

use log::trace;

use crate::model::{Car, PriceBand};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryQuery {
    pub search: String,
    /// Exact brand name, as listed by [`brands`].
    pub brand: Option<String>,
    pub price: Option<PriceBand>,
}

impl InventoryQuery {
    pub fn matches(&self, car: &Car) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || [&car.name, &car.brand, &car.model]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        let matches_brand = self.brand.as_deref().map_or(true, |brand| car.brand == brand);
        let matches_price = self.price.map_or(true, |band| band.contains(car.price));
        matches_search && matches_brand && matches_price
    }

    /// Cars matching every criterion, in catalog order.
    pub fn filter<'a>(&self, cars: &'a [Car]) -> Vec<&'a Car> {
        let found: Vec<&Car> = cars.iter().filter(|car| self.matches(car)).collect();
        trace!("Inventory query {:?} matched {} of {} car(s).", self, found.len(), cars.len());
        found
    }

    /// Number of criteria that narrow the result.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            self.brand.is_some(),
            self.price.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Parses `text [brand=<Brand>] [price=<band>]`.
    ///
    /// Brand names with spaces use `_`, e.g. `brand=Land_Rover`. Unknown price
    /// bands are ignored.
    pub fn parse(input: &str) -> Self {
        let mut query = Self::default();
        let mut words = Vec::new();
        for token in input.split_whitespace() {
            if let Some(brand) = token.strip_prefix("brand=") {
                query.brand = Some(brand.replace('_', " "));
            } else if let Some(band) = token.strip_prefix("price=") {
                query.price = band.parse().ok();
            } else {
                words.push(token);
            }
        }
        query.search = words.join(" ");
        query
    }
}

/// Distinct brands in order of first appearance.
pub fn brands(cars: &[Car]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for car in cars {
        if !seen.contains(&car.brand.as_str()) {
            seen.push(&car.brand);
        }
    }
    seen
}
