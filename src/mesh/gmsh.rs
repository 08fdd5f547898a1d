//! Gmsh mesh file I/O.
//!
//! Supports reading and writing Gmsh MSH format version 2.2 (ASCII).
//! This is the most widely supported format for Gmsh meshes.
//!
//! ## Sections
//! - `$PhysicalNames`: boundary region names
//! - `$Nodes`: point coordinates
//! - `$Elements`: boundary facets (physical tag = region) followed by
//!   volume elements (physical tag 0, elementary tag = region)
//! - `$Periodic`: one link per identification number
//!
//! ## Supported Element Types
//! - 15 = Point, 1 = Line, 2 = Triangle, 3 = Quadrilateral
//! - 4 = Tetrahedron, 5 = Hexahedron
//!
//! Tetrahedra and hexahedra are stored left-handed; their corners are
//! permuted on write so that every element has a positive Jacobian on the
//! Gmsh reference element, and permuted back on read. The curved flag and
//! any attached bounding box are not represented in the format.
//!
//! ## Example
//! ```no_run
//! use structmesh::generation::make_quad_mesh;
//! use structmesh::mesh::gmsh::{read_gmsh_mesh, write_gmsh_mesh};
//! use std::path::Path;
//!
//! let mesh = make_quad_mesh(4, 4, true, false, None).unwrap();
//! write_gmsh_mesh(&mesh, Path::new("square.msh")).unwrap();
//! let back = read_gmsh_mesh(Path::new("square.msh")).unwrap();
//! assert_eq!(back.n_elements(), 16);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use super::buffer::{BuilderError, MeshBuffer};
use super::entities::{ElementShape, FaceDescriptor, IdentificationKind};
use super::sink::MeshSink;
use super::structured::StructuredMesh;
use crate::types::{PointId, RegionIndex};

/// Error type for Gmsh I/O operations.
#[derive(Debug, Error)]
pub enum GmshError {
    /// File could not be opened.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid file format.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unsupported mesh format version.
    #[error("Unsupported Gmsh version: {0}")]
    UnsupportedVersion(String),

    /// Unsupported element type.
    #[error("Unsupported element type: {0}")]
    UnsupportedElement(i32),

    /// Missing required section.
    #[error("Missing section: {0}")]
    MissingSection(String),

    /// The file content does not form a valid mesh.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] BuilderError),
}

/// File position `k` of a tetrahedron holds stored corner `TET_NODE_ORDER[k]`.
const TET_NODE_ORDER: [usize; 4] = [0, 2, 1, 3];

/// File position `k` of a hexahedron holds stored corner `HEX_NODE_ORDER[k]`.
const HEX_NODE_ORDER: [usize; 8] = [0, 3, 2, 1, 4, 7, 6, 5];

/// Gmsh element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GmshElementType {
    Line = 1,
    Triangle = 2,
    Quadrilateral = 3,
    Tetrahedron = 4,
    Hexahedron = 5,
    Point = 15,
}

impl GmshElementType {
    fn shape(self) -> ElementShape {
        match self {
            GmshElementType::Point => ElementShape::Point,
            GmshElementType::Line => ElementShape::Segment,
            GmshElementType::Triangle => ElementShape::Triangle,
            GmshElementType::Quadrilateral => ElementShape::Quadrilateral,
            GmshElementType::Tetrahedron => ElementShape::Tetrahedron,
            GmshElementType::Hexahedron => ElementShape::Hexahedron,
        }
    }

    /// Stored corner written at each file position, or `None` when the
    /// two orders agree.
    fn node_order(self) -> Option<&'static [usize]> {
        match self {
            GmshElementType::Tetrahedron => Some(&TET_NODE_ORDER),
            GmshElementType::Hexahedron => Some(&HEX_NODE_ORDER),
            _ => None,
        }
    }
}

/// Reorder stored corners into file order.
fn to_file_order<T: Copy>(kind: GmshElementType, stored: &[T]) -> Vec<T> {
    match kind.node_order() {
        Some(order) => order.iter().map(|&c| stored[c]).collect(),
        None => stored.to_vec(),
    }
}

/// Reorder corners read from a file into stored order.
fn from_file_order<T: Copy>(kind: GmshElementType, file: &[T]) -> Vec<T> {
    match kind.node_order() {
        Some(order) => {
            let mut stored = file.to_vec();
            for (k, &c) in order.iter().enumerate() {
                stored[c] = file[k];
            }
            stored
        }
        None => file.to_vec(),
    }
}

impl From<ElementShape> for GmshElementType {
    fn from(shape: ElementShape) -> Self {
        match shape {
            ElementShape::Point => GmshElementType::Point,
            ElementShape::Segment => GmshElementType::Line,
            ElementShape::Triangle => GmshElementType::Triangle,
            ElementShape::Quadrilateral => GmshElementType::Quadrilateral,
            ElementShape::Tetrahedron => GmshElementType::Tetrahedron,
            ElementShape::Hexahedron => GmshElementType::Hexahedron,
        }
    }
}

impl TryFrom<i32> for GmshElementType {
    type Error = GmshError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GmshElementType::Line),
            2 => Ok(GmshElementType::Triangle),
            3 => Ok(GmshElementType::Quadrilateral),
            4 => Ok(GmshElementType::Tetrahedron),
            5 => Ok(GmshElementType::Hexahedron),
            15 => Ok(GmshElementType::Point),
            _ => Err(GmshError::UnsupportedElement(value)),
        }
    }
}

/// One `$Elements` record.
#[derive(Debug)]
struct RawElement {
    shape: ElementShape,
    physical: u32,
    elementary: u32,
    nodes: Vec<usize>,
}

/// Contents of a parsed file, in file numbering.
#[derive(Debug, Default)]
struct RawMesh {
    names: Vec<(u32, String)>,
    nodes: Vec<(usize, [f64; 3])>,
    elements: Vec<RawElement>,
    periodic: Vec<(u32, Vec<(usize, usize)>)>,
}

fn parse_field<T: FromStr>(field: Option<&str>, what: &str) -> Result<T, GmshError> {
    let field = field.ok_or_else(|| GmshError::ParseError(format!("Missing {}", what)))?;
    field
        .parse()
        .map_err(|_| GmshError::ParseError(format!("Invalid {}: {}", what, field)))
}

fn next_line<I>(lines: &mut I, what: &str) -> Result<String, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(GmshError::ParseError(format!("Unexpected end of file in {}", what))),
    }
}

fn skip_to<I>(lines: &mut I, end: &str) -> Result<(), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    for line_result in lines.by_ref() {
        let line = line_result?;
        if line.trim().starts_with(end) {
            return Ok(());
        }
    }
    Err(GmshError::MissingSection(end.to_string()))
}

/// Read a Gmsh MSH file (format 2.2).
///
/// The mesh dimension is the largest element dimension found. Elements
/// one dimension lower become boundary facets of their physical region.
///
/// # Arguments
/// * `path` - Path to the MSH file
///
/// # Returns
/// * `Ok(StructuredMesh)` - The parsed mesh
/// * `Err(GmshError)` - If reading or parsing fails
pub fn read_gmsh_mesh(path: &Path) -> Result<StructuredMesh, GmshError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = reader.lines();
    let mut raw = RawMesh::default();

    // Parse sections
    while let Some(line_result) = lines.next() {
        let line = line_result?;
        let line = line.trim();

        if line.starts_with("$MeshFormat") {
            parse_mesh_format(&mut lines)?;
        } else if line.starts_with("$PhysicalNames") {
            raw.names = parse_physical_names(&mut lines)?;
        } else if line.starts_with("$Nodes") {
            raw.nodes = parse_nodes(&mut lines)?;
        } else if line.starts_with("$Elements") {
            raw.elements = parse_elements(&mut lines)?;
        } else if line.starts_with("$Periodic") {
            raw.periodic = parse_periodic(&mut lines)?;
        }
    }

    if raw.nodes.is_empty() {
        return Err(GmshError::MissingSection("Nodes".to_string()));
    }
    if raw.elements.is_empty() {
        return Err(GmshError::MissingSection("Elements".to_string()));
    }

    build_mesh_from_gmsh(raw)
}

/// Parse the $MeshFormat section.
fn parse_mesh_format<I>(lines: &mut I) -> Result<(), GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let line = next_line(lines, "MeshFormat")?;
    let version = line
        .split_whitespace()
        .next()
        .ok_or_else(|| GmshError::ParseError("Empty MeshFormat line".to_string()))?;
    if !version.starts_with("2.") {
        return Err(GmshError::UnsupportedVersion(version.to_string()));
    }
    skip_to(lines, "$EndMeshFormat")
}

/// Parse the $PhysicalNames section.
fn parse_physical_names<I>(lines: &mut I) -> Result<Vec<(u32, String)>, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let count_line = next_line(lines, "PhysicalNames")?;
    let n_names: usize = parse_field(Some(count_line.trim()), "physical name count")?;
    let mut names = Vec::with_capacity(n_names);

    for _ in 0..n_names {
        // Format: dim tag "name"
        let line = next_line(lines, "PhysicalNames")?;
        let mut parts = line.trim().splitn(3, char::is_whitespace);
        let _dim: u32 = parse_field(parts.next(), "physical dimension")?;
        let tag: u32 = parse_field(parts.next(), "physical tag")?;
        let name = parts
            .next()
            .map(|s| s.trim().trim_matches('"').to_string())
            .ok_or_else(|| GmshError::ParseError(format!("Invalid physical name line: {}", line)))?;
        names.push((tag, name));
    }

    skip_to(lines, "$EndPhysicalNames")?;
    Ok(names)
}

/// Parse the $Nodes section.
fn parse_nodes<I>(lines: &mut I) -> Result<Vec<(usize, [f64; 3])>, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let count_line = next_line(lines, "Nodes")?;
    let n_nodes: usize = parse_field(Some(count_line.trim()), "node count")?;
    let mut nodes = Vec::with_capacity(n_nodes);

    for _ in 0..n_nodes {
        // Format: node_id x y z
        let line = next_line(lines, "Nodes")?;
        let mut parts = line.split_whitespace();
        let tag: usize = parse_field(parts.next(), "node id")?;
        let x: f64 = parse_field(parts.next(), "x coordinate")?;
        let y: f64 = parse_field(parts.next(), "y coordinate")?;
        let z: f64 = parse_field(parts.next(), "z coordinate")?;
        nodes.push((tag, [x, y, z]));
    }

    skip_to(lines, "$EndNodes")?;
    Ok(nodes)
}

/// Parse the $Elements section.
fn parse_elements<I>(lines: &mut I) -> Result<Vec<RawElement>, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let count_line = next_line(lines, "Elements")?;
    let n_elements: usize = parse_field(Some(count_line.trim()), "element count")?;
    let mut elements = Vec::with_capacity(n_elements);

    for _ in 0..n_elements {
        // Format: elem_id elem_type n_tags tag1 ... tagN node1 node2 ...
        let line = next_line(lines, "Elements")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let mut fields = parts.iter().copied();
        let _id: usize = parse_field(fields.next(), "element id")?;
        let elem_type: i32 = parse_field(fields.next(), "element type")?;
        let n_tags: usize = parse_field(fields.next(), "tag count")?;

        let elem_type = match GmshElementType::try_from(elem_type) {
            Ok(t) => t,
            Err(_) => {
                // Higher-order and other element types are not part of the subset
                tracing::trace!(elem_type, "skipping unsupported element");
                continue;
            }
        };

        let tags = (0..n_tags)
            .map(|_| parse_field::<u32>(fields.next(), "element tag"))
            .collect::<Result<Vec<_>, _>>()?;
        let shape = elem_type.shape();
        let nodes = (0..shape.n_points())
            .map(|_| parse_field::<usize>(fields.next(), "element node"))
            .collect::<Result<Vec<_>, _>>()?;

        elements.push(RawElement {
            shape,
            physical: tags.first().copied().unwrap_or(0),
            elementary: tags.get(1).copied().unwrap_or(0),
            nodes,
        });
    }

    skip_to(lines, "$EndElements")?;
    Ok(elements)
}

/// Parse the $Periodic section.
fn parse_periodic<I>(lines: &mut I) -> Result<Vec<(u32, Vec<(usize, usize)>)>, GmshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let count_line = next_line(lines, "Periodic")?;
    let n_links: usize = parse_field(Some(count_line.trim()), "periodic link count")?;
    let mut links = Vec::with_capacity(n_links);

    for _ in 0..n_links {
        // Format: dim slave_tag master_tag, then node count and node pairs
        let header = next_line(lines, "Periodic")?;
        let mut parts = header.split_whitespace();
        let _dim: u32 = parse_field(parts.next(), "periodic dimension")?;
        let ident: u32 = parse_field(parts.next(), "slave entity tag")?;

        let count_line = next_line(lines, "Periodic")?;
        let n_pairs: usize = parse_field(Some(count_line.trim()), "periodic node count")?;
        let mut pairs = Vec::with_capacity(n_pairs);
        for _ in 0..n_pairs {
            let line = next_line(lines, "Periodic")?;
            let mut parts = line.split_whitespace();
            let slave: usize = parse_field(parts.next(), "slave node")?;
            let master: usize = parse_field(parts.next(), "master node")?;
            pairs.push((master, slave));
        }
        links.push((ident, pairs));
    }

    skip_to(lines, "$EndPeriodic")?;
    Ok(links)
}

/// Build a StructuredMesh from Gmsh data.
fn build_mesh_from_gmsh(raw: RawMesh) -> Result<StructuredMesh, GmshError> {
    let dim = raw
        .elements
        .iter()
        .map(|e| e.shape.dim())
        .max()
        .unwrap_or(0);
    if dim == 0 {
        return Err(GmshError::MissingSection("Elements (volume)".to_string()));
    }

    let mut buffer = MeshBuffer::with_capacity(dim, raw.nodes.len());
    let mut node_map: HashMap<usize, PointId> = HashMap::with_capacity(raw.nodes.len());
    for &(tag, coord) in &raw.nodes {
        node_map.insert(tag, buffer.add_point(coord)?);
    }
    let lookup = |tag: usize| -> Result<PointId, GmshError> {
        node_map
            .get(&tag)
            .copied()
            .ok_or_else(|| GmshError::ParseError(format!("Unknown node {}", tag)))
    };

    for (ident, pairs) in &raw.periodic {
        for &(master, slave) in pairs {
            buffer.add_periodic_identification(
                lookup(master)?,
                lookup(slave)?,
                *ident,
                IdentificationKind::Periodic,
            )?;
        }
    }

    let facet_regions: BTreeSet<u32> = raw
        .elements
        .iter()
        .filter(|e| e.shape.dim() + 1 == dim)
        .map(|e| e.physical)
        .collect();
    if dim == 3 {
        for &region in &facet_regions {
            buffer.add_face_descriptor(FaceDescriptor::boundary(RegionIndex::new(region)))?;
        }
    }

    for e in raw.elements.iter().filter(|e| e.shape.dim() == dim) {
        let nodes = from_file_order(GmshElementType::from(e.shape), &e.nodes);
        let points = nodes.iter().map(|&n| lookup(n)).collect::<Result<Vec<_>, _>>()?;
        let region = RegionIndex::new(e.elementary.max(RegionIndex::DOMAIN.get()));
        buffer.add_volume_element(region, &points, false)?;
    }
    for e in raw.elements.iter().filter(|e| e.shape.dim() + 1 == dim) {
        let points = e.nodes.iter().map(|&n| lookup(n)).collect::<Result<Vec<_>, _>>()?;
        buffer.add_boundary_facet(RegionIndex::new(e.physical), &points)?;
    }

    for (tag, name) in &raw.names {
        if facet_regions.contains(tag) {
            buffer.set_boundary_name(RegionIndex::new(*tag), name)?;
        }
    }

    Ok(buffer.finalize()?)
}

/// Write a StructuredMesh to Gmsh MSH format 2.2.
///
/// # Arguments
/// * `mesh` - The mesh to write
/// * `path` - Output file path
pub fn write_gmsh_mesh(mesh: &StructuredMesh, path: &Path) -> Result<(), GmshError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // Write header
    writeln!(writer, "$MeshFormat")?;
    writeln!(writer, "2.2 0 8")?;
    writeln!(writer, "$EndMeshFormat")?;

    if !mesh.boundary_names.is_empty() {
        writeln!(writer, "$PhysicalNames")?;
        writeln!(writer, "{}", mesh.boundary_names.len())?;
        for (region, name) in &mesh.boundary_names {
            writeln!(writer, "{} {} \"{}\"", mesh.dim - 1, region.get(), name)?;
        }
        writeln!(writer, "$EndPhysicalNames")?;
    }

    // Write nodes
    writeln!(writer, "$Nodes")?;
    writeln!(writer, "{}", mesh.n_points())?;
    for (i, [x, y, z]) in mesh.points.iter().enumerate() {
        writeln!(writer, "{} {} {} {}", i + 1, x, y, z)?;
    }
    writeln!(writer, "$EndNodes")?;

    writeln!(writer, "$Elements")?;
    writeln!(writer, "{}", mesh.n_facets() + mesh.n_elements())?;

    // Write boundary facets first
    let mut elem_id = 1;
    for facet in &mesh.facets {
        let tag = facet.region.get();
        // Format: elem_id type n_tags physical_tag geometrical_tag node1 ...
        write!(
            writer,
            "{} {} 2 {} {}",
            elem_id,
            GmshElementType::from(facet.shape) as i32,
            tag,
            tag
        )?;
        for p in &facet.points {
            write!(writer, " {}", p.get() + 1)?;
        }
        writeln!(writer)?;
        elem_id += 1;
    }

    // Write volume elements
    for elem in &mesh.elements {
        let kind = GmshElementType::from(elem.shape);
        write!(writer, "{} {} 2 0 {}", elem_id, kind as i32, elem.region.get())?;
        for p in to_file_order(kind, &elem.points) {
            write!(writer, " {}", p.get() + 1)?;
        }
        writeln!(writer)?;
        elem_id += 1;
    }

    writeln!(writer, "$EndElements")?;

    let groups = mesh.identification_groups();
    if !groups.is_empty() {
        writeln!(writer, "$Periodic")?;
        writeln!(writer, "{}", groups.len())?;
        for (ident, pairs) in &groups {
            writeln!(writer, "{} {} {}", mesh.dim - 1, ident, ident)?;
            writeln!(writer, "{}", pairs.len())?;
            for id in pairs {
                writeln!(writer, "{} {}", id.slave.get() + 1, id.master.get() + 1)?;
            }
        }
        writeln!(writer, "$EndPeriodic")?;
    }

    writer.flush()?;
    Ok(())
}
