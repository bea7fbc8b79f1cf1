use crate::math::Point3;
use crate::topology::{CurveId, EdgeId, FaceId, SegmentId, SolidId};

/// What a pick ray hit, tagged with the parent of the hit entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Face { face: FaceId, parent: SolidId },
    Edge { edge: EdgeId, parent: SolidId },
    Segment { segment: SegmentId, parent: CurveId },
    /// Something that is never selectable (grid, helpers, gizmo handles).
    Other,
}

/// One intersection reported by the picking layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub target: PickTarget,
    /// World-space intersection point.
    pub point: Point3,
    /// Distance from the ray origin.
    pub distance: f64,
}

impl PickHit {
    #[must_use]
    pub fn new(target: PickTarget, point: Point3, distance: f64) -> Self {
        Self {
            target,
            point,
            distance,
        }
    }
}

/// Orders hits for resolution: every edge hit moves ahead of every face hit.
///
/// Only the slots occupied by edge and face hits are permuted; edges and faces
/// keep their relative order, and all other hits stay where the picking layer
/// put them.
pub(crate) fn order_hits(hits: &[PickHit]) -> Vec<&PickHit> {
    let mut ordered: Vec<&PickHit> = hits.iter().collect();

    let slots: Vec<usize> = hits
        .iter()
        .enumerate()
        .filter(|(_, hit)| {
            matches!(
                hit.target,
                PickTarget::Face { .. } | PickTarget::Edge { .. }
            )
        })
        .map(|(index, _)| index)
        .collect();

    let edges = hits
        .iter()
        .filter(|hit| matches!(hit.target, PickTarget::Edge { .. }));
    let faces = hits
        .iter()
        .filter(|hit| matches!(hit.target, PickTarget::Face { .. }));

    for (slot, hit) in slots.into_iter().zip(edges.chain(faces)) {
        ordered[slot] = hit;
    }
    ordered
}
