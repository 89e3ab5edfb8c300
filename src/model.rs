//! Defines the core data structures and enums used by the showcase.
//!
//! This includes the car records shown in the inventory and detail views, the
//! full-screen showcase slides, and the snapshot of controller state handed to
//! the presentation layer. Car data is deserialized from the catalog JSON.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Technical specifications listed on a car's detail page.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarSpecs {
    pub engine: String,
    pub horsepower: String,
    /// e.g. "0-60 mph in 3.9s".
    pub acceleration: String,
    pub top_speed: String,
    pub transmission: String,
    pub drivetrain: String,
    /// City/highway, e.g. "15/24 mpg".
    pub fuel_economy: String,
    pub seating: String,
}

/// A car in the dealership inventory.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    /// Asking price in whole dollars.
    pub price: u32,
    #[serde(default)]
    pub images: Vec<String>,
    pub specs: CarSpecs,
    #[serde(default)]
    pub features: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

impl Car {
    /// Price formatted for display, e.g. "$249,900".
    pub fn display_price(&self) -> String {
        let digits = self.price.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        out.push('$');
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

/// One full-screen slide of the home page showcase.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseCar {
    /// Stable slug, e.g. "bentley-continental".
    pub id: String,
    pub name: String,
    pub model: String,
    pub brand: String,
    pub background_image: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub description: String,
    /// Already formatted for display.
    pub price: String,
    pub category: String,
}

/// Which way the most recent transition moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// Read-only view of the controller state, published after every change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowcaseSnapshot {
    pub current_index: usize,
    pub direction: Direction,
    pub is_transitioning: bool,
    pub is_auto_playing: bool,
    /// Latched once the last slide has been shown.
    pub has_completed_cycle: bool,
    /// The pointer is over the showcase and autoplay is suspended.
    pub is_paused: bool,
    pub slide_count: usize,
}

impl ShowcaseSnapshot {
    /// Position for "k / N" progress rendering, 1-based.
    pub fn position(&self) -> usize {
        self.current_index + 1
    }
}

/// Price buckets offered by the inventory filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceBand {
    /// Below $150,000.
    Under150k,
    /// $150,000 up to but excluding $250,000.
    From150kTo250k,
    /// $250,000 and above.
    Over250k,
}

impl PriceBand {
    pub fn contains(&self, price: u32) -> bool {
        match self {
            PriceBand::Under150k => price < 150_000,
            PriceBand::From150kTo250k => (150_000..250_000).contains(&price),
            PriceBand::Over250k => price >= 250_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::Under150k => "under-150k",
            PriceBand::From150kTo250k => "150k-250k",
            PriceBand::Over250k => "over-250k",
        }
    }
}

impl FromStr for PriceBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "under-150k" => Ok(PriceBand::Under150k),
            "150k-250k" => Ok(PriceBand::From150kTo250k),
            "over-250k" => Ok(PriceBand::Over250k),
            other => Err(format!("unknown price band '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_bands_split_at_boundaries() {
        assert!(PriceBand::Under150k.contains(149_999));
        assert!(!PriceBand::Under150k.contains(150_000));
        assert!(PriceBand::From150kTo250k.contains(150_000));
        assert!(PriceBand::From150kTo250k.contains(249_999));
        assert!(!PriceBand::From150kTo250k.contains(250_000));
        assert!(PriceBand::Over250k.contains(250_000));
    }

    #[test]
    fn price_band_parses_its_own_label() {
        for band in [PriceBand::Under150k, PriceBand::From150kTo250k, PriceBand::Over250k] {
            assert_eq!(band.as_str().parse::<PriceBand>(), Ok(band));
        }
        assert!("cheap".parse::<PriceBand>().is_err());
    }

    #[test]
    fn display_price_groups_thousands() {
        let car: Car = serde_json::from_str(
            r#"{"id":1,"name":"A8 L","brand":"Audi","model":"A8 L","year":2024,"price":99900,
                "specs":{"engine":"V8","horsepower":"453 hp","acceleration":"0-60 mph in 4.6s",
                "topSpeed":"155 mph","transmission":"8-Speed","drivetrain":"AWD",
                "fuelEconomy":"17/26 mpg","seating":"5 seats"},
                "description":"Sedan"}"#,
        )
        .unwrap();
        assert_eq!(car.display_price(), "$99,900");
        assert!(!car.featured);
        assert!(car.images.is_empty());
    }
}
