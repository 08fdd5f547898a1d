//! Boundary facet generation.
//!
//! Every logical side of the grid becomes one boundary region. Facets are
//! produced by walking a [`FaceSweep`](super::FaceSweep) so their winding follows the sweep
//! directions: 2D edges run counter-clockwise around the domain and 3D
//! faces are wound with an outward normal.

use super::elements::{Connectivity, QUAD_TO_TRIANGLES};
use super::indexer::GridIndexer;
use crate::types::{Axis, RegionIndex, Side};

/// A named logical side of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryRegion {
    pub index: RegionIndex,
    pub name: &'static str,
    pub axis: Axis,
    pub side: Side,
}

const fn region(index: u32, name: &'static str, axis: Axis, side: Side) -> BoundaryRegion {
    BoundaryRegion {
        index: RegionIndex::new(index),
        name,
        axis,
        side,
    }
}

/// End points of a line.
pub const LINE_REGIONS: [BoundaryRegion; 2] = [
    region(1, "left", Axis::X, Side::Min),
    region(2, "right", Axis::X, Side::Max),
];

/// Sides of a rectangle, counter-clockwise from the bottom.
pub const PLANE_REGIONS: [BoundaryRegion; 4] = [
    region(1, "bottom", Axis::Y, Side::Min),
    region(2, "right", Axis::X, Side::Max),
    region(3, "top", Axis::Y, Side::Max),
    region(4, "left", Axis::X, Side::Min),
];

/// Faces of a box.
pub const BOX_REGIONS: [BoundaryRegion; 6] = [
    region(1, "left", Axis::X, Side::Min),
    region(2, "bottom", Axis::Y, Side::Min),
    region(3, "back", Axis::Z, Side::Min),
    region(4, "right", Axis::X, Side::Max),
    region(5, "front", Axis::Z, Side::Max),
    region(6, "top", Axis::Y, Side::Max),
];

/// Facets of one boundary region.
#[derive(Clone, Debug)]
pub struct RegionFacets {
    pub region: BoundaryRegion,
    pub facets: Connectivity,
}

/// Point facets at both ends of a line.
pub fn line_facets(grid: &GridIndexer<1>) -> Vec<RegionFacets> {
    LINE_REGIONS
        .iter()
        .map(|&region| {
            let sweep = grid.side_sweep(region.side);
            let mut facets = Connectivity::with_capacity(1, 1);
            facets.push(&[sweep.base]);
            tracing::trace!(region = %region.index, name = region.name, "end point facet");
            RegionFacets { region, facets }
        })
        .collect()
}

/// Edge facets of the four sides of a rectangle.
pub fn plane_facets(grid: &GridIndexer<2>) -> Vec<RegionFacets> {
    PLANE_REGIONS
        .iter()
        .map(|&region| {
            let sweep = grid.side_sweep(region.axis, region.side);
            let mut facets = Connectivity::with_capacity(2, sweep.facet_count());
            for edge in sweep.edges() {
                facets.push(&edge);
            }
            tracing::trace!(
                region = %region.index,
                name = region.name,
                n_facets = facets.len(),
                "side sweep"
            );
            RegionFacets { region, facets }
        })
        .collect()
}

/// Quad or triangle facets of the six faces of a box.
///
/// Triangles use the same split as the volume elements so each one
/// coincides with a face of a boundary tetrahedron.
pub fn box_facets(grid: &GridIndexer<3>, triangles: bool) -> Vec<RegionFacets> {
    BOX_REGIONS
        .iter()
        .map(|&region| {
            let sweep = grid.side_sweep(region.axis, region.side);
            let mut facets = if triangles {
                Connectivity::with_capacity(3, 2 * sweep.facet_count())
            } else {
                Connectivity::with_capacity(4, sweep.facet_count())
            };
            for quad in sweep.quads() {
                if triangles {
                    facets.push_split(&quad, &QUAD_TO_TRIANGLES);
                } else {
                    facets.push(&quad);
                }
            }
            tracing::trace!(
                region = %region.index,
                name = region.name,
                n_facets = facets.len(),
                "face sweep"
            );
            RegionFacets { region, facets }
        })
        .collect()
}
