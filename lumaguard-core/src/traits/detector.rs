//! Marker Detector Trait

use crate::detection::DetectionResult;

/// Fiducial marker detector over frames of type `F`
pub trait Detector<F: ?Sized> {
    /// Detect markers in `frame`
    ///
    /// A frame without markers is a normal result, not an error; it feeds
    /// the uncertainty score as evidence.
    fn detect(&mut self, frame: &F) -> DetectionResult;

    /// Draw detections onto the outgoing view
    ///
    /// Default does nothing.
    fn visualize(&mut self, _frame: &F, _detection: &DetectionResult) {}
}

impl<F: ?Sized, D: Detector<F> + ?Sized> Detector<F> for &mut D {
    fn detect(&mut self, frame: &F) -> DetectionResult {
        (**self).detect(frame)
    }

    fn visualize(&mut self, frame: &F, detection: &DetectionResult) {
        (**self).visualize(frame, detection)
    }
}
