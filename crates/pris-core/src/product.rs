//! Product entities and the API-boundary normalization step
//!
//! The product API omits fields freely, so payloads decode into `Raw*` types
//! where nearly everything is optional. [`RawProduct::normalize`] turns one
//! into a fully typed [`Product`] before anything downstream sees it.

use crate::price::{parse_timestamp, PricePoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product identifier as assigned by the product API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    #[error("product payload is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("product {id} has an empty name")]
    EmptyName { id: ProductId },
}

// ============================================================================
// RAW PAYLOAD TYPES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    pub id: Option<u64>,
    pub depth: Option<i32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStore {
    pub name: Option<String>,
    pub code: Option<String>,
    pub url: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPricePoint {
    pub price: Option<f64>,
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAllergen {
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub contains: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNutrient {
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLabelIcon {
    pub svg: Option<String>,
    pub png: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub name: Option<String>,
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<RawLabelIcon>,
}

/// Product exactly as the API sends it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProduct {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub vendor: Option<String>,
    pub ean: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub category: Option<Vec<RawCategory>>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub current_price: Option<f64>,
    pub current_unit_price: Option<f64>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub store: Option<RawStore>,
    pub price_history: Option<Vec<RawPricePoint>>,
    pub allergens: Option<Vec<RawAllergen>>,
    pub nutrition: Option<Vec<RawNutrient>>,
    pub labels: Option<Vec<RawLabel>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// ============================================================================
// NORMALIZED ENTITIES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Option<u64>,
    pub depth: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub name: String,
    pub code: String,
    pub url: Option<String>,
    pub logo: Option<String>,
}

/// Whether a product contains an allergen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllergenPresence {
    Yes,
    No,
    #[default]
    Unknown,
}

impl AllergenPresence {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "YES" => Self::Yes,
            "NO" => Self::No,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Inneholder",
            Self::No => "Inneholder ikke",
            Self::Unknown => "Kan inneholde spor",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Yes => "allergen-yes",
            Self::No => "allergen-no",
            Self::Unknown => "allergen-unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allergen {
    pub code: String,
    pub display_name: String,
    pub contains: AllergenPresence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nutrient {
    pub code: String,
    pub display_name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Weight {
    pub amount: f64,
    pub unit: String,
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

/// Fully typed product, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: Option<String>,
    pub vendor: Option<String>,
    pub ean: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub categories: Vec<Category>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub current_price: Option<f64>,
    pub current_unit_price: Option<f64>,
    pub weight: Option<Weight>,
    pub store: Option<Store>,
    pub price_history: Vec<PricePoint>,
    pub allergens: Vec<Allergen>,
    pub nutrition: Vec<Nutrient>,
    pub labels: Vec<Label>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn store_name(&self) -> Option<&str> {
        self.store.as_ref().map(|s| s.name.as_str())
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Innermost category, used as the card subtitle
    pub fn primary_category(&self) -> Option<&Category> {
        self.categories.iter().max_by_key(|c| c.depth)
    }

    /// Change from the oldest to the newest recorded price, as a fraction
    pub fn price_change(&self) -> Option<f64> {
        let sorted = crate::price::sorted_by_date(&self.price_history);
        let first = sorted.first()?;
        let last = sorted.last()?;
        if sorted.len() < 2 || first.price == 0.0 {
            return None;
        }
        Some((last.price - first.price) / first.price)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl RawCategory {
    /// Categories without a name are dropped
    pub fn normalize(self) -> Option<Category> {
        Some(Category {
            id: self.id,
            depth: self.depth.unwrap_or(0),
            name: non_empty(self.name)?,
        })
    }
}

impl RawStore {
    pub fn normalize(self) -> Option<Store> {
        let name = non_empty(self.name)?;
        Some(Store {
            code: non_empty(self.code).unwrap_or_else(|| name.to_uppercase()),
            name,
            url: non_empty(self.url),
            logo: non_empty(self.logo),
        })
    }
}

impl RawPricePoint {
    /// Drops points without a parseable date or with a negative price
    pub fn normalize(self) -> Option<PricePoint> {
        let price = self.price.filter(|p| p.is_finite() && *p >= 0.0)?;
        let date = self.date.as_deref().and_then(parse_timestamp)?;
        Some(PricePoint::new(price, date))
    }
}

impl RawProduct {
    pub fn normalize(self) -> Result<Product, ProductError> {
        let id = ProductId(self.id.ok_or(ProductError::MissingField("id"))?);
        let name = self.name.ok_or(ProductError::MissingField("name"))?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ProductError::EmptyName { id });
        }

        let categories = self
            .category
            .unwrap_or_default()
            .into_iter()
            .filter_map(RawCategory::normalize)
            .collect();

        let store = self.store.and_then(RawStore::normalize);

        let raw_history = self.price_history.unwrap_or_default();
        let raw_count = raw_history.len();
        let price_history: Vec<PricePoint> = raw_history
            .into_iter()
            .filter_map(RawPricePoint::normalize)
            .collect();
        if price_history.len() < raw_count {
            tracing::debug!(
                "Product {}: dropped {} malformed price points",
                id,
                raw_count - price_history.len()
            );
        }

        let allergens = self
            .allergens
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| {
                let code = non_empty(a.code)?;
                Some(Allergen {
                    display_name: non_empty(a.display_name).unwrap_or_else(|| code.clone()),
                    code,
                    contains: a
                        .contains
                        .as_deref()
                        .map(AllergenPresence::parse)
                        .unwrap_or_default(),
                })
            })
            .collect();

        let nutrition = self
            .nutrition
            .unwrap_or_default()
            .into_iter()
            .filter_map(|n| {
                let code = non_empty(n.code)?;
                Some(Nutrient {
                    display_name: non_empty(n.display_name).unwrap_or_else(|| code.clone()),
                    code,
                    amount: n.amount.filter(|a| a.is_finite())?,
                    unit: n.unit.unwrap_or_default(),
                })
            })
            .collect();

        let labels = self
            .labels
            .unwrap_or_default()
            .into_iter()
            .filter_map(|l| {
                let name = non_empty(l.name)?;
                Some(Label {
                    display_name: non_empty(l.display_name).unwrap_or_else(|| name.clone()),
                    name,
                    description: non_empty(l.description),
                    icon_url: l.icon.and_then(|i| non_empty(i.svg).or(non_empty(i.png))),
                })
            })
            .collect();

        let weight = match (self.weight, non_empty(self.weight_unit)) {
            (Some(amount), Some(unit)) if amount > 0.0 => Some(Weight { amount, unit }),
            _ => None,
        };

        Ok(Product {
            id,
            name,
            brand: non_empty(self.brand),
            vendor: non_empty(self.vendor),
            ean: non_empty(self.ean),
            url: non_empty(self.url),
            image: non_empty(self.image),
            categories,
            description: non_empty(self.description),
            ingredients: non_empty(self.ingredients),
            current_price: self.current_price.filter(|p| p.is_finite()),
            current_unit_price: self.current_unit_price.filter(|p| p.is_finite()),
            weight,
            store,
            price_history,
            allergens,
            nutrition,
            labels,
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        })
    }
}
