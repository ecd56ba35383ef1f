use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MalnadError;
use crate::models::{AugmentedListing, Category, Coordinate, GuestType};

pub const DEFAULT_MAX_PRICE: u64 = 25_000;
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Either every value, or just one
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: FromStr<Err = MalnadError>> FromStr for Selection<T> {
    type Err = MalnadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Highest rated first, or nearest first once an origin is set
    #[default]
    Recommended,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortMode {
    type Err = MalnadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "recommended" | "rating" => Ok(SortMode::Recommended),
            "priceasc" | "pricelow" => Ok(SortMode::PriceAsc),
            "pricedesc" | "pricehigh" => Ok(SortMode::PriceDesc),
            other => Err(MalnadError::invalid_argument(format!("unknown sort mode '{other}'"))),
        }
    }
}

/// The browse page's query state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterParams {
    /// Matched case-insensitively against title and location
    pub text: String,
    /// Inclusive price ceiling
    pub max_price: u64,
    pub category: Selection<Category>,
    pub guest_type: Selection<GuestType>,
    /// Every entry must be a case-insensitive substring of some amenity
    pub amenities: Vec<String>,
    pub origin: Option<Coordinate>,
    /// Only meaningful when `origin` is set
    pub max_distance_km: f64,
    pub sort: SortMode,
    /// 1-based
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            max_price: DEFAULT_MAX_PRICE,
            category: Selection::All,
            guest_type: Selection::All,
            amenities: Vec::new(),
            origin: None,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            sort: SortMode::Recommended,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterParams {
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_max_price(mut self, max_price: u64) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Selection::Only(category);
        self
    }

    pub fn with_guest_type(mut self, guest_type: GuestType) -> Self {
        self.guest_type = Selection::Only(guest_type);
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_origin(mut self, origin: Coordinate, max_distance_km: f64) -> Self {
        self.origin = Some(origin);
        self.max_distance_km = max_distance_km;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page_number: usize, page_size: usize) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }
}

/// One page of query results
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    pub page: Vec<AugmentedListing>,
    pub total_count: usize,
    pub total_pages: usize,
}
