use medifind_common::location::GeoLocation;
use medifind_common::pharmacy::Pharmacy;

/// Supplies a distance to a pharmacy when the caller gave no coordinates.
pub trait DistanceEstimator: Send + Sync {
    fn estimate_km(&self, pharmacy: &Pharmacy) -> f64;
}

/// Measures from a fixed reference point, normally the service area's centre.
pub struct ReferencePoint(pub GeoLocation);

impl DistanceEstimator for ReferencePoint {
    fn estimate_km(&self, pharmacy: &Pharmacy) -> f64 {
        self.0.distance_km(&pharmacy.coordinates)
    }
}

/// Same distance for every pharmacy.
pub struct FixedDistance(pub f64);

impl DistanceEstimator for FixedDistance {
    fn estimate_km(&self, _pharmacy: &Pharmacy) -> f64 {
        self.0
    }
}

/// Distance to `pharmacy`: haversine from `user` when known, else the estimator's guess.
pub fn distance_to(
    user: Option<GeoLocation>,
    pharmacy: &Pharmacy,
    estimator: &dyn DistanceEstimator,
) -> f64 {
    match user {
        Some(user) => user.distance_km(&pharmacy.coordinates),
        None => estimator.estimate_km(pharmacy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medifind_common::pharmacy::PharmacyId;

    fn pharmacy(lat: f64, lng: f64) -> Pharmacy {
        Pharmacy {
            id: PharmacyId(1),
            name: "Apollo Pharmacy".to_string(),
            location: "Multiple Locations".to_string(),
            phone: String::new(),
            address: String::new(),
            hours: String::new(),
            coordinates: GeoLocation::new(lat, lng),
            delivery_radius_km: 5.0,
        }
    }

    #[test]
    fn user_coordinates_take_precedence() {
        let p = pharmacy(12.9716, 77.5946);
        let d = distance_to(Some(GeoLocation::new(12.9716, 77.5946)), &p, &FixedDistance(9.0));
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn estimator_used_without_coordinates() {
        let p = pharmacy(12.9716, 77.5946);
        assert_eq!(distance_to(None, &p, &FixedDistance(2.5)), 2.5);
    }

    #[test]
    fn reference_point_is_deterministic() {
        let p = pharmacy(12.9750, 77.6000);
        let est = ReferencePoint(GeoLocation::new(12.9716, 77.5946));
        assert_eq!(est.estimate_km(&p), est.estimate_km(&p));
        assert!(est.estimate_km(&p) > 0.0);
    }
}
