//! Parsing of raw query and path values into typed inputs.
//!
//! Query strings are taken as `Option<String>` so malformed numbers become
//! `{"error": ...}` validation responses instead of extractor rejections.

use serde::Deserialize;

use medifind_common::location::GeoLocation;

use crate::error::{ApiError, ApiResult};

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_f64(name: &str, raw: Option<&str>) -> ApiResult<Option<f64>> {
    present(raw)
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ApiError::validation(format!("{name} must be a number")))
        })
        .transpose()
}

pub fn parse_limit(raw: Option<&str>, default: usize) -> ApiResult<usize> {
    match present(raw) {
        Some(s) => s
            .parse::<usize>()
            .map_err(|_| ApiError::validation("limit must be a non-negative integer")),
        None => Ok(default),
    }
}

/// Parse a numeric path id. Anything that is not a number cannot name a record.
pub fn parse_id(raw: &str, what: &str) -> ApiResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ApiError::not_found(format!("{what} not found")))
}

/// `userLat`/`userLng` query pair. Both must be present for a location to be used.
#[derive(Debug, Default, Deserialize)]
pub struct CoordinateParams {
    #[serde(rename = "userLat")]
    pub user_lat: Option<String>,
    #[serde(rename = "userLng")]
    pub user_lng: Option<String>,
}

impl CoordinateParams {
    pub fn location(&self) -> ApiResult<Option<GeoLocation>> {
        let lat = parse_f64("userLat", self.user_lat.as_deref())?;
        let lng = parse_f64("userLng", self.user_lng.as_deref())?;
        match (lat, lng) {
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                    return Err(ApiError::validation("Coordinates out of range"));
                }
                Ok(Some(GeoLocation::new(lat, lng)))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}
