use crate::geo::LatLng;
use crate::models::{PermitRecord, Truck};
use crate::query::TruckQuery;

const APPROVED: &str = "APPROVED";

/// Turns upstream permits into the trucks matching `query`.
///
/// A permit qualifies when it is approved, has a parseable location inside
/// the requested bounds, serves at least one of the requested foods and
/// carries the requested name. Each permit yields at most one truck.
pub fn select_trucks(permits: &[PermitRecord], query: &TruckQuery) -> Vec<Truck> {
    permits.iter().filter_map(|permit| to_truck(permit, query)).collect()
}

fn to_truck(permit: &PermitRecord, query: &TruckQuery) -> Option<Truck> {
    if permit.status != APPROVED {
        return None;
    }
    let location = permit.location.as_ref()?;
    let point = LatLng::new(location.latitude.trim().parse().ok()?, location.longitude.trim().parse().ok()?);
    if let Some(bounds) = &query.bounds {
        if !bounds.contains(&point) {
            return None;
        }
    }

    let fooditems = permit.fooditems.as_ref().map(|f| f.replace(':', ","));
    if !query.food.is_empty() {
        let items = fooditems.as_deref()?;
        if !query.food.iter().any(|food| contains_ignore_case(items, food)) {
            return None;
        }
    }
    if let Some(name) = &query.name {
        if permit.applicant.to_lowercase() != name.to_lowercase() {
            return None;
        }
    }

    Some(Truck {
        name: permit.applicant.clone(),
        address: permit.address.clone(),
        latitude: location.latitude.clone(),
        longitude: location.longitude.clone(),
        fooditems,
        schedule: permit.schedule.clone(),
    })
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
