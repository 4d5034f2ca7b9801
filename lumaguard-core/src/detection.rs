//! Detector Output
//!
//! One [`DetectionResult`] per frame, produced by a
//! [`Detector`](crate::Detector) and consumed only by the uncertainty engine.

use heapless::FnvIndexSet;

use crate::constants::MAX_MARKERS;

/// Fiducial marker identity (dictionary index)
pub type MarkerId = u32;

/// Result of running the marker detector on one frame
#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
    /// Whether any marker was found
    pub detected: bool,

    /// Pixel area of the primary (first reported) marker outline
    pub primary_region_area: f32,

    /// Distinct marker ids seen in the frame
    markers: FnvIndexSet<MarkerId, MAX_MARKERS>,
}

impl DetectionResult {
    /// Nothing detected
    pub fn none() -> Self {
        Self::default()
    }

    /// A detection whose primary marker covers `area` px²
    ///
    /// Ids beyond [`MAX_MARKERS`] distinct values are dropped; duplicates
    /// collapse.
    pub fn found<I>(area: f32, ids: I) -> Self
    where
        I: IntoIterator<Item = MarkerId>,
    {
        let mut markers = FnvIndexSet::new();
        for id in ids {
            if markers.insert(id).is_err() {
                break;
            }
        }
        Self {
            detected: true,
            primary_region_area: area,
            markers,
        }
    }

    /// Marker ids in unspecified order
    pub fn marker_ids(&self) -> impl Iterator<Item = MarkerId> + '_ {
        self.markers.iter().copied()
    }

    /// Number of distinct markers
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Primary area sanitised for scoring: negative or non-finite becomes 0
    pub fn scoring_area(&self) -> f32 {
        if self.primary_region_area.is_finite() && self.primary_region_area > 0.0 {
            self.primary_region_area
        } else {
            0.0
        }
    }
}
