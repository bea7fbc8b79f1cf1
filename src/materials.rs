use crate::topology::{CurveId, TopologyItem};

/// Opaque material handle understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Default appearance lookup provided by the rendering layer.
///
/// The selection engine only uses it to put the default appearance back on
/// faces, edges and curves when they are deselected.
pub trait MaterialDatabase {
    /// Default material for a face or edge.
    fn lookup(&self, item: TopologyItem) -> MaterialId;

    /// Default material for a standalone curve.
    fn line(&self, curve: CurveId) -> MaterialId;
}
