use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub original_name: String,
    pub translated_name: String,
    pub description: String,
    pub spiciness: FlavorLevel,
    pub sweetness: FlavorLevel,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub allergens: Vec<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Category,
    #[serde(default, deserialize_with = "lenient_price_range")]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Dish {
    pub fn is_valid(&self) -> bool {
        !self.original_name.trim().is_empty()
    }
}

/// Spiciness or sweetness on a 1..=5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "u8")]
pub struct FlavorLevel(u8);

impl FlavorLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, FlavorLevelError> {
        Self::try_from(i64::from(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorLevelError(i64);

impl fmt::Display for FlavorLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level must be {}-{}, got {}",
            FlavorLevel::MIN,
            FlavorLevel::MAX,
            self.0
        )
    }
}

impl std::error::Error for FlavorLevelError {}

impl TryFrom<i64> for FlavorLevel {
    type Error = FlavorLevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(FlavorLevelError(value))
        }
    }
}

impl From<FlavorLevel> for u8 {
    fn from(level: FlavorLevel) -> Self {
        level.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Appetizer,
    Main,
    Dessert,
    Beverage,
    #[default]
    Other,
}

impl Category {
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "appetizer" => Self::Appetizer,
            "main" => Self::Main,
            "dessert" => Self::Dessert,
            "beverage" => Self::Beverage,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appetizer => "appetizer",
            Self::Main => "main",
            Self::Dessert => "dessert",
            Self::Beverage => "beverage",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum PriceRange {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Expensive,
    #[serde(rename = "$$$$")]
    Luxury,
}

impl PriceRange {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "$" => Some(Self::Budget),
            "$$" => Some(Self::Moderate),
            "$$$" => Some(Self::Expensive),
            "$$$$" => Some(Self::Luxury),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Budget => "$",
            Self::Moderate => "$$",
            Self::Expensive => "$$$",
            Self::Luxury => "$$$$",
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .map(Category::parse_lenient)
        .unwrap_or_default())
}

// Unknown symbols become "no price shown" rather than failing the dish.
fn lenient_price_range<'de, D>(deserializer: D) -> Result<Option<PriceRange>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(PriceRange::from_symbol))
}
