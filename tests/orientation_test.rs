//! Orientation and conformity of generated meshes.
//!
//! Boundary facets must point out of the domain, volume elements must
//! share one orientation, and facets must coincide with element faces.

use std::collections::{HashMap, HashSet};

use structmesh::generation::{Structured2D, Structured3D};
use structmesh::mesh::measures::polygon_normal;
use structmesh::mesh::{ElementShape, StructuredMesh};

fn centroid(coords: &[[f64; 3]]) -> [f64; 3] {
    let n = coords.len() as f64;
    let mut c = [0.0; 3];
    for p in coords {
        for d in 0..3 {
            c[d] += p[d] / n;
        }
    }
    c
}

/// Faces of a volume element as sorted point lists.
fn element_faces(shape: ElementShape, p: &[usize]) -> Vec<Vec<usize>> {
    let local: &[&[usize]] = match shape {
        ElementShape::Tetrahedron => &[&[0, 1, 2], &[0, 1, 3], &[0, 2, 3], &[1, 2, 3]],
        ElementShape::Hexahedron => &[
            &[0, 1, 2, 3],
            &[4, 5, 6, 7],
            &[0, 1, 5, 4],
            &[3, 2, 6, 7],
            &[0, 3, 7, 4],
            &[1, 2, 6, 5],
        ],
        ElementShape::Triangle => &[&[0, 1], &[1, 2], &[2, 0]],
        ElementShape::Quadrilateral => &[&[0, 1], &[1, 2], &[2, 3], &[3, 0]],
        _ => unreachable!(),
    };
    local
        .iter()
        .map(|f| {
            let mut face: Vec<usize> = f.iter().map(|&c| p[c]).collect();
            face.sort_unstable();
            face
        })
        .collect()
}

/// Faces that belong to exactly one element.
fn exposed_faces(mesh: &StructuredMesh) -> HashSet<Vec<usize>> {
    let mut count: HashMap<Vec<usize>, usize> = HashMap::new();
    for e in &mesh.elements {
        let ids: Vec<usize> = e.points.iter().map(|p| p.get()).collect();
        for face in element_faces(e.shape, &ids) {
            *count.entry(face).or_default() += 1;
        }
    }
    assert!(count.values().all(|&c| c <= 2), "face shared by more than two elements");
    count.into_iter().filter(|&(_, c)| c == 1).map(|(f, _)| f).collect()
}

fn facet_sets(mesh: &StructuredMesh) -> HashSet<Vec<usize>> {
    mesh.facets
        .iter()
        .map(|f| {
            let mut ids: Vec<usize> = f.points.iter().map(|p| p.get()).collect();
            ids.sort_unstable();
            ids
        })
        .collect()
}

#[test]
fn test_2d_elements_counter_clockwise() {
    for mesh in [
        Structured2D::new(4, 3).generate().unwrap(),
        Structured2D::new(4, 3).triangles().generate().unwrap(),
    ] {
        for k in 0..mesh.n_elements() {
            assert!(mesh.element_measure(k) > 0.0, "element {} is clockwise", k);
        }
    }
}

#[test]
fn test_2d_boundary_interior_on_left() {
    let mesh = Structured2D::new(3, 5).generate().unwrap();
    let center = [0.5, 0.5];
    for f in 0..mesh.n_facets() {
        let c = mesh.facet_coords(f);
        let (dx, dy) = (c[1][0] - c[0][0], c[1][1] - c[0][1]);
        let mid = [(c[0][0] + c[1][0]) / 2.0, (c[0][1] + c[1][1]) / 2.0];
        // Left normal (-dy, dx) must point toward the interior
        let dot = -dy * (center[0] - mid[0]) + dx * (center[1] - mid[1]);
        assert!(dot > 0.0, "facet {} has interior on the right", f);
    }
}

#[test]
fn test_3d_facets_point_outward() {
    for mesh in [
        Structured3D::with_resolution(2, 3, 2).generate().unwrap(),
        Structured3D::with_resolution(2, 3, 2).tetrahedra().generate().unwrap(),
    ] {
        let center = [0.5, 0.5, 0.5];
        for f in 0..mesh.n_facets() {
            let coords = mesh.facet_coords(f);
            let n = polygon_normal(&coords);
            let c = centroid(&coords);
            let outward: f64 = (0..3).map(|d| n[d] * (c[d] - center[d])).sum();
            assert!(outward > 0.0, "facet {} points inward", f);
        }
    }
}

#[test]
fn test_3d_volume_elements_share_orientation() {
    for mesh in [
        Structured3D::with_resolution(3, 2, 2).generate().unwrap(),
        Structured3D::with_resolution(3, 2, 2).tetrahedra().generate().unwrap(),
    ] {
        let signs: HashSet<bool> = (0..mesh.n_elements())
            .map(|k| {
                let v = mesh.element_measure(k);
                assert!(v.abs() > 1e-12, "element {} is degenerate", k);
                v > 0.0
            })
            .collect();
        assert_eq!(signs.len(), 1);
    }
}

#[test]
fn test_tet_mesh_is_conforming() {
    let mesh = Structured3D::with_resolution(3, 2, 4).tetrahedra().generate().unwrap();
    // Every exposed tet face is a boundary triangle and vice versa
    assert_eq!(exposed_faces(&mesh), facet_sets(&mesh));
}

#[test]
fn test_hex_mesh_is_conforming() {
    let mesh = Structured3D::with_resolution(2, 3, 2).generate().unwrap();
    assert_eq!(exposed_faces(&mesh), facet_sets(&mesh));
}

#[test]
fn test_2d_meshes_are_conforming() {
    for mesh in [
        Structured2D::new(4, 2).generate().unwrap(),
        Structured2D::new(4, 2).triangles().generate().unwrap(),
    ] {
        assert_eq!(exposed_faces(&mesh), facet_sets(&mesh));
    }
}

#[test]
fn test_points_are_shared_not_duplicated() {
    let mesh = Structured3D::with_resolution(2, 2, 2).tetrahedra().generate().unwrap();
    let distinct: HashSet<[u64; 3]> = mesh
        .points
        .iter()
        .map(|p| [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()])
        .collect();
    assert_eq!(distinct.len(), mesh.n_points());

    let used: HashSet<usize> = mesh
        .elements
        .iter()
        .flat_map(|e| e.points.iter().map(|p| p.get()))
        .collect();
    assert_eq!(used.len(), mesh.n_points());
}
