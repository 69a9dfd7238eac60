//! Catalog filtering and ordering.
//!
//! Everything here is a pure function of the catalog slice and the query, so
//! applying the same query twice gives the same result.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::medicine::Medicine;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_CATEGORY_LIMIT: usize = 20;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Name,
    PriceLow,
    PriceHigh,
    Rating,
    /// Nearest stocking pharmacy first. Medicines with no known distance go last.
    Distance,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortOrder::Name),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "rating" => Ok(SortOrder::Rating),
            "distance" => Ok(SortOrder::Distance),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Substring of a stocking pharmacy's name.
    pub location: Option<String>,
    pub max_distance_km: Option<f64>,
    pub sort: Option<SortOrder>,
    pub limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: None,
            category: None,
            min_price: None,
            max_price: None,
            location: None,
            max_distance_km: None,
            sort: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl SearchQuery {
    pub fn category(category: &str, limit: usize) -> Self {
        Self {
            category: Some(category.to_string()),
            limit,
            ..Self::default()
        }
    }
}

/// Run `query` over `catalog`.
///
/// `distance_of` yields the distance in km from the caller to the nearest
/// pharmacy stocking a medicine; it is only consulted for the distance filter
/// and the distance sort.
pub fn search<F>(catalog: &[Medicine], query: &SearchQuery, distance_of: F) -> Vec<Medicine>
where
    F: Fn(&Medicine) -> Option<f64>,
{
    let text = query
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
    let location = query
        .location
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase);

    let mut results: Vec<(Medicine, Option<f64>)> = catalog
        .iter()
        .filter(|m| text.as_deref().map_or(true, |t| m.matches_text(t)))
        .filter(|m| category.map_or(true, |c| m.has_category(c)))
        .filter(|m| query.min_price.map_or(true, |min| m.price >= min))
        .filter(|m| query.max_price.map_or(true, |max| m.price <= max))
        .filter(|m| {
            location.as_deref().map_or(true, |loc| {
                m.pharmacies.iter().any(|p| p.to_lowercase().contains(loc))
            })
        })
        .map(|m| {
            let needs_distance =
                query.max_distance_km.is_some() || query.sort == Some(SortOrder::Distance);
            let distance = if needs_distance { distance_of(m) } else { None };
            (m.clone(), distance)
        })
        .filter(|(_, d)| match query.max_distance_km {
            Some(max) => d.is_some_and(|d| d <= max),
            None => true,
        })
        .collect();

    if let Some(sort) = query.sort {
        // Vec::sort_by is stable; ties keep catalog order.
        results.sort_by(|(a, da), (b, db)| compare(sort, a, *da, b, *db));
    }

    results.truncate(query.limit);
    results.into_iter().map(|(m, _)| m).collect()
}

fn compare(sort: SortOrder, a: &Medicine, da: Option<f64>, b: &Medicine, db: Option<f64>) -> Ordering {
    match sort {
        SortOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortOrder::PriceLow => a.price.total_cmp(&b.price),
        SortOrder::PriceHigh => b.price.total_cmp(&a.price),
        SortOrder::Rating => b.rating.total_cmp(&a.rating),
        SortOrder::Distance => match (da, db) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Most-reviewed medicines first.
pub fn popular(catalog: &[Medicine], limit: usize) -> Vec<Medicine> {
    let mut sorted = catalog.to_vec();
    sorted.sort_by(|a, b| b.reviews.cmp(&a.reviews));
    sorted.truncate(limit);
    sorted
}
