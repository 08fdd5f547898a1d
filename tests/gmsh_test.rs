//! Gmsh round trips of generated meshes.

use structmesh::generation::{Structured1D, Structured2D, Structured3D};
use structmesh::mesh::measures::tet_volume;
use structmesh::mesh::{StructuredMesh, read_gmsh_mesh, write_gmsh_mesh};
use tempfile::NamedTempFile;

fn roundtrip(mesh: &StructuredMesh) -> StructuredMesh {
    let file = NamedTempFile::new().unwrap();
    write_gmsh_mesh(mesh, file.path()).unwrap();
    read_gmsh_mesh(file.path()).unwrap()
}

/// Volume elements of a written file as (type, node coordinates in file order).
fn written_volume_elements(mesh: &StructuredMesh) -> Vec<(i32, Vec<[f64; 3]>)> {
    let file = NamedTempFile::new().unwrap();
    write_gmsh_mesh(mesh, file.path()).unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();

    let mut nodes = Vec::new();
    let mut elements = Vec::new();
    let mut section = "";
    for line in text.lines() {
        if line.starts_with('$') {
            section = line;
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        match section {
            "$Nodes" if fields.len() == 4 => {
                let c: Vec<f64> = fields[1..].iter().map(|f| f.parse().unwrap()).collect();
                nodes.push([c[0], c[1], c[2]]);
            }
            "$Elements" if fields.len() > 1 => {
                let kind: i32 = fields[1].parse().unwrap();
                let n_tags: usize = fields[2].parse().unwrap();
                if kind == 4 || kind == 5 {
                    let coords = fields[3 + n_tags..]
                        .iter()
                        .map(|f| nodes[f.parse::<usize>().unwrap() - 1])
                        .collect();
                    elements.push((kind, coords));
                }
            }
            _ => {}
        }
    }
    elements
}

fn assert_same_topology(a: &StructuredMesh, b: &StructuredMesh) {
    assert_eq!(a.dim, b.dim);
    assert_eq!(a.points, b.points);
    assert_eq!(a.elements, b.elements);
    assert_eq!(a.facets, b.facets);
    assert_eq!(a.identifications, b.identifications);
    assert_eq!(a.boundary_names, b.boundary_names);
}

#[test]
fn test_roundtrip_1d_periodic() {
    let mesh = Structured1D::new(5).periodic().generate().unwrap();
    assert_same_topology(&mesh, &roundtrip(&mesh));
}

#[test]
fn test_roundtrip_2d_triangles() {
    let mesh = Structured2D::new(3, 4)
        .triangles()
        .periodic_x()
        .periodic_y()
        .generate()
        .unwrap();
    assert_same_topology(&mesh, &roundtrip(&mesh));
}

#[test]
fn test_roundtrip_3d_tets() {
    let mesh = Structured3D::with_resolution(2, 3, 2)
        .tetrahedra()
        .periodic_x()
        .generate()
        .unwrap();
    let back = roundtrip(&mesh);
    assert_same_topology(&mesh, &back);
    assert_eq!(mesh.face_descriptors, back.face_descriptors);
    // The bounding box is not stored in the file
    assert!(mesh.geometry.is_some());
    assert!(back.geometry.is_none());
}

#[test]
fn test_roundtrip_mapped_coordinates() {
    let mesh = Structured3D::with_resolution(2, 2, 2)
        .with_mapping(|[x, y, z]| [x.sin(), 1.0 / 3.0 + y, (z * 7.0).exp()])
        .generate()
        .unwrap();
    let back = roundtrip(&mesh);
    assert_eq!(mesh.points, back.points);
    // The curved flag is not part of the format
    assert!(mesh.has_curved_elements());
    assert!(!back.has_curved_elements());
}

#[test]
fn test_written_volume_elements_are_right_handed() {
    let tets = Structured3D::with_resolution(2, 3, 2).tetrahedra().generate().unwrap();
    let written = written_volume_elements(&tets);
    assert_eq!(written.len(), tets.n_elements());
    for (kind, c) in &written {
        assert_eq!(*kind, 4);
        assert!(tet_volume(c[0], c[1], c[2], c[3]) > 0.0);
    }

    let hexes = Structured3D::with_resolution(2, 3, 2)
        .with_mapping(|[x, y, z]| [x + 0.1 * y, y, 2.0 * z])
        .generate()
        .unwrap();
    let written = written_volume_elements(&hexes);
    assert_eq!(written.len(), hexes.n_elements());
    for (kind, c) in &written {
        assert_eq!(*kind, 5);
        // Jacobian at each bottom corner along its Gmsh reference edges
        for (a, b, d, up) in [(0, 1, 3, 4), (1, 2, 0, 5), (2, 3, 1, 6), (3, 0, 2, 7)] {
            assert!(tet_volume(c[a], c[b], c[d], c[up]) > 0.0);
        }
    }
}
