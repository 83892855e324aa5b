//! In-memory spatial index for radius queries.
//!
//! Wraps an R-tree of point entries. Radius queries prune with a
//! degree-space bounding box around the query point, then filter the
//! survivors with an exact Haversine check, so results never include a
//! point farther than the requested radius.

use rstar::{AABB, RTree, RTreeObject};

use crate::{Coordinate, distance_km};

/// Kilometers per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 110.574;

/// A point entry stored in the R-tree with its payload.
struct PointEntry<T> {
    value: T,
    position: Coordinate,
    envelope: AABB<[f64; 2]>,
}

impl<T> RTreeObject for PointEntry<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over payload-carrying points.
///
/// Constructed once from a snapshot of locations and queried many times
/// per matchmaking pass.
pub struct PointIndex<T> {
    tree: RTree<PointEntry<T>>,
}

impl<T> PointIndex<T> {
    /// Builds an index from `(payload, coordinate)` pairs.
    #[must_use]
    pub fn new(points: Vec<(T, Coordinate)>) -> Self {
        let entries = points
            .into_iter()
            .map(|(value, position)| PointEntry {
                value,
                position,
                envelope: AABB::from_point([position.lng, position.lat]),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Returns all points within `radius_km` of `center`, each paired
    /// with its exact great-circle distance. Unsorted.
    pub fn within_radius_km(&self, center: Coordinate, radius_km: f64) -> Vec<(&T, f64)> {
        let envelopes = search_envelopes(center, radius_km);
        envelopes
            .iter()
            .flat_map(|bbox| self.tree.locate_in_envelope(bbox))
            .filter_map(|entry| {
                let d = distance_km(center, entry.position);
                (d <= radius_km).then_some((&entry.value, d))
            })
            .collect()
    }
}

/// Degree-space bounding boxes guaranteed to contain the `radius_km`
/// circle around `center`.
///
/// A circle straddling the antimeridian covers two disjoint longitude
/// intervals in [-180, 180], so the search may need two envelopes. The
/// split intervals never overlap (their combined width is 2·dlng <
/// 360°), so no point is reported twice.
fn search_envelopes(center: Coordinate, radius_km: f64) -> Vec<AABB<[f64; 2]>> {
    let dlat = radius_km / KM_PER_DEGREE;
    let (south, north) = (center.lat - dlat, center.lat + dlat);

    // Longitude degrees shrink with latitude. Near the poles the cosine
    // collapses, so fall back to the full longitude range there.
    let cos_lat = center.lat.to_radians().cos();
    let dlng = if cos_lat > 0.01 {
        radius_km / (KM_PER_DEGREE * cos_lat)
    } else {
        360.0
    };
    if dlng >= 180.0 {
        return vec![AABB::from_corners([-180.0, south], [180.0, north])];
    }

    let west = center.lng - dlng;
    let east = center.lng + dlng;
    if west < -180.0 {
        vec![
            AABB::from_corners([-180.0, south], [east, north]),
            AABB::from_corners([west + 360.0, south], [180.0, north]),
        ]
    } else if east > 180.0 {
        vec![
            AABB::from_corners([west, south], [180.0, north]),
            AABB::from_corners([-180.0, south], [east - 360.0, north]),
        ]
    } else {
        vec![AABB::from_corners([west, south], [east, north])]
    }
}
