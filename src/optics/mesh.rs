use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use glam::DVec3;
use log::{info, warn};

use crate::error::{CausticError, CausticResult};

/// Normals further than this from unit length are reported after loading.
const UNIT_NORMAL_TOLERANCE: f64 = 1e-3;

/// Vertex positions and normals exactly as they appear in an OBJ file.
///
/// Nothing is validated here: the two arrays may be empty or of different
/// lengths. Use [`LensMesh::try_from`] to turn this into usable geometry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObjGeometry {
    pub vertices: Vec<DVec3>,
    pub normals: Vec<DVec3>,
}

/// Lens surface sampled as index-aligned vertices and normals.
///
/// Always non-empty with `vertices.len() == normals.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct LensMesh {
    vertices: Vec<DVec3>,
    normals: Vec<DVec3>,
}

impl LensMesh {
    /// Read and validate the OBJ file at `path`.
    ///
    /// # Errors
    ///
    /// [`CausticError::MeshFile`] if the file cannot be opened or read,
    /// [`CausticError::Geometry`] if it holds no usable vertex/normal pairs.
    pub fn load(path: &Path) -> CausticResult<Self> {
        let file = File::open(path).map_err(|e| {
            CausticError::MeshFile(format!("cannot open {}: {e}", path.display()))
        })?;
        let geometry = parse_obj(BufReader::new(file)).map_err(|e| {
            CausticError::MeshFile(format!("cannot read {}: {e}", path.display()))
        })?;
        let mesh = Self::try_from(geometry)?;

        info!(
            "Loaded {} vertices and normals from {}",
            mesh.sample_count(),
            path.display()
        );
        let skewed = mesh.non_unit_normals();
        if skewed > 0 {
            warn!("{skewed} normals in {} are not unit length", path.display());
        }
        Ok(mesh)
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    pub fn sample_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of normals whose length is not 1 within a small tolerance.
    pub fn non_unit_normals(&self) -> usize {
        self.normals
            .iter()
            .filter(|n| (n.length() - 1.0).abs() > UNIT_NORMAL_TOLERANCE)
            .count()
    }
}

impl TryFrom<ObjGeometry> for LensMesh {
    type Error = CausticError;

    fn try_from(geometry: ObjGeometry) -> CausticResult<Self> {
        let ObjGeometry { vertices, normals } = geometry;
        if vertices.is_empty() || normals.is_empty() {
            return Err(CausticError::Geometry(format!(
                "no geometry or normals found ({} vertices, {} normals)",
                vertices.len(),
                normals.len()
            )));
        }
        if vertices.len() != normals.len() {
            return Err(CausticError::Geometry(format!(
                "vertex and normal counts differ ({} vertices, {} normals)",
                vertices.len(),
                normals.len()
            )));
        }
        Ok(Self { vertices, normals })
    }
}

/// Collect `v` and `vn` records from an OBJ stream.
///
/// `vt` records and every other kind of line are ignored. Records with fewer
/// than three coordinates are skipped silently; records whose coordinates are
/// not numbers are skipped with a warning. Lines are decoded lossily, so bytes
/// that are not UTF-8 (typically in comments or object names) do not stop the
/// load.
///
/// # Errors
///
/// Only I/O errors of the underlying reader are returned.
pub fn parse_obj(mut reader: impl BufRead) -> io::Result<ObjGeometry> {
    let mut geometry = ObjGeometry::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim_end_matches(['\n', '\r']);
        let mut tokens = line.split_whitespace();
        let target = match tokens.next() {
            Some("v") => &mut geometry.vertices,
            Some("vn") => &mut geometry.normals,
            _ => continue,
        };

        let coords: Vec<&str> = tokens.take(3).collect();
        if coords.len() < 3 {
            continue;
        }
        match parse_triplet(&coords) {
            Some(v) => target.push(v),
            None => warn!("skipping malformed record on line {line_no}: {line}"),
        }
    }

    Ok(geometry)
}

fn parse_triplet(coords: &[&str]) -> Option<DVec3> {
    let x = coords[0].parse().ok()?;
    let y = coords[1].parse().ok()?;
    let z = coords[2].parse().ok()?;
    Some(DVec3::new(x, y, z))
}
