//! Signed measures of mesh entities.
//!
//! Signs encode orientation: a triangle or quad wound counter-clockwise in
//! the xy-plane has positive area, and all tetrahedra of a consistently
//! oriented mesh share one volume sign.

use super::entities::ElementShape;

/// Five-tetrahedron split of a hexahedron in stored corner order: one tet
/// cut off at each of corners 1, 3, 4 and 6, then the central tet on
/// corners 0, 2, 5 and 7.
const HEX_VOLUME_SPLIT: [[usize; 4]; 5] = [
    [1, 0, 5, 2],
    [3, 2, 7, 0],
    [4, 5, 0, 7],
    [6, 7, 2, 5],
    [0, 2, 7, 5],
];

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Euclidean length of a segment.
pub fn segment_length(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = sub(b, a);
    dot(d, d).sqrt()
}

/// Signed area of a planar polygon projected onto the xy-plane (shoelace).
pub fn polygon_area(points: &[[f64; 3]]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        area += p[0] * q[1] - q[0] * p[1];
    }
    0.5 * area
}

/// Area-weighted normal of a polygon in 3D (Newell's method).
///
/// The vector points along the right-hand normal of the winding and its
/// length equals the polygon area.
pub fn polygon_normal(points: &[[f64; 3]]) -> [f64; 3] {
    let n = points.len();
    let mut normal = [0.0; 3];
    for i in 0..n {
        let c = cross(points[i], points[(i + 1) % n]);
        for d in 0..3 {
            normal[d] += 0.5 * c[d];
        }
    }
    normal
}

/// Signed volume of a tetrahedron.
pub fn tet_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    dot(sub(b, a), cross(sub(c, a), sub(d, a))) / 6.0
}

/// Signed volume of a hexahedron, summed over a five-tetrahedron split.
///
/// Exact for parallelepipeds; an approximation for warped cells.
pub fn hex_volume(corners: &[[f64; 3]; 8]) -> f64 {
    HEX_VOLUME_SPLIT
        .iter()
        .map(|t| tet_volume(corners[t[0]], corners[t[1]], corners[t[2]], corners[t[3]]))
        .sum()
}

/// Signed measure of an entity of the given shape.
///
/// Segments are signed by their x-extent so that reversed 1D elements
/// show up as negative.
///
/// # Panics
///
/// Panics if `coords.len()` does not match the shape's point count.
pub fn measure(shape: ElementShape, coords: &[[f64; 3]]) -> f64 {
    assert_eq!(
        coords.len(),
        shape.n_points(),
        "{} needs {} points",
        shape,
        shape.n_points()
    );
    match shape {
        ElementShape::Point => 0.0,
        ElementShape::Segment => {
            let len = segment_length(coords[0], coords[1]);
            if coords[1][0] < coords[0][0] { -len } else { len }
        }
        ElementShape::Triangle | ElementShape::Quadrilateral => polygon_area(coords),
        ElementShape::Tetrahedron => tet_volume(coords[0], coords[1], coords[2], coords[3]),
        ElementShape::Hexahedron => {
            let corners: [[f64; 3]; 8] = std::array::from_fn(|i| coords[i]);
            hex_volume(&corners)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polygon_area_ccw_positive() {
        let square = [
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        assert_relative_eq!(polygon_area(&square), 2.0);

        let mut reversed = square;
        reversed.reverse();
        assert_relative_eq!(polygon_area(&reversed), -2.0);
    }

    #[test]
    fn test_polygon_normal() {
        let tri = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let n = polygon_normal(&tri);
        assert_relative_eq!(n[0], 0.0);
        assert_relative_eq!(n[1], 0.0);
        assert_relative_eq!(n[2], 0.5);
    }

    #[test]
    fn test_unit_tet() {
        let v = tet_volume(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        );
        assert_relative_eq!(v, 1.0 / 6.0);
    }

    #[test]
    fn test_hex_volume_of_box() {
        // Corner order of the generated hexahedra: z, then y, then x.
        let (a, b, c) = (2.0, 3.0, 0.5);
        let corners = [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, c],
            [0.0, b, c],
            [0.0, b, 0.0],
            [a, 0.0, 0.0],
            [a, 0.0, c],
            [a, b, c],
            [a, b, 0.0],
        ];
        assert_relative_eq!(hex_volume(&corners), -a * b * c, epsilon = 1e-12);
    }

    #[test]
    fn test_hex_split_tets_share_sign() {
        let corners = [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
        ];
        for t in HEX_VOLUME_SPLIT {
            let v = tet_volume(corners[t[0]], corners[t[1]], corners[t[2]], corners[t[3]]);
            assert!(v < 0.0);
        }
    }

    #[test]
    fn test_segment_sign() {
        let a = [0.25, 0.0, 0.0];
        let b = [0.75, 0.0, 0.0];
        assert_relative_eq!(measure(ElementShape::Segment, &[a, b]), 0.5);
        assert_relative_eq!(measure(ElementShape::Segment, &[b, a]), -0.5);
    }

    #[test]
    #[should_panic(expected = "needs 3 points")]
    fn test_measure_arity() {
        measure(ElementShape::Triangle, &[[0.0; 3]; 4]);
    }
}
