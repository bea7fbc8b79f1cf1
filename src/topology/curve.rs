use crate::materials::MaterialId;

slotmap::new_key_type! {
    /// Unique identifier for a standalone space curve.
    pub struct CurveId;
}

slotmap::new_key_type! {
    /// Unique identifier for a segment of a space curve.
    pub struct SegmentId;
}

/// Data associated with a standalone space curve.
///
/// Curves have no face or edge children; picking reports their segments.
#[derive(Debug, Clone)]
pub struct CurveData {
    /// Segments making up the curve, in order.
    pub segments: Vec<SegmentId>,
    /// The material the curve is currently rendered with.
    pub material: MaterialId,
}

/// Data associated with a curve segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentData {
    /// The curve this segment belongs to.
    pub parent: CurveId,
}
