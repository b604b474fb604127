//! # Domain models for the static storefront data
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Product`] | One catalog entry. Prices are kept as the decimal strings the catalog is authored with; the UI prints them verbatim next to `currency`. |
//! | [`OnboardingSlide`] | One page of the first-launch carousel. |

use serde::Serialize;

/// A product in the in-memory catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub category: &'static str,
    pub brand: &'static str,
    /// Wattage or volume, when the product has one: "750w", "5 Litres"
    pub capacity: Option<&'static str>,
    pub price: &'static str,
    pub offer_price: &'static str,
    pub currency: &'static str,
    pub description: &'static str,
    pub quantity_available: u32,
    pub deal: bool,
    pub popular: bool,
}

impl Product {
    /// Case-insensitive match against name or description.
    /// `needle` must already be lowercase.
    pub fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// A page of the onboarding carousel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OnboardingSlide {
    pub title: &'static str,
    pub description: &'static str,
}
