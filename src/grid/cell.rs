use crate::error::{Result, WellIndexError};
use crate::geom::bboxes::BoundingBox;
use crate::geom::face::Face;
use crate::{Point, Vector};
use serde::{Deserialize, Serialize};

/// Directional permeabilities of a cell (mD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Permeability {
    pub kx: f64,
    pub ky: f64,
    pub kz: f64,
}

impl Permeability {
    pub fn new(kx: f64, ky: f64, kz: f64) -> Self {
        Self { kx, ky, kz }
    }

    pub fn isotropic(k: f64) -> Self {
        Self::new(k, k, k)
    }
}

/// Local corner numbering: `i + 2 * j + 4 * k` for `i, j, k` in `{0, 1}`.
///
/// Faces are listed as I-, I+, J-, J+, K-, K+ with corners in cyclic order.
const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 2, 6, 4],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 1, 3, 2],
    [4, 5, 7, 6],
];

/// Hexahedral grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub global_index: usize,
    pub ijk: (usize, usize, usize),
    pub corners: [Point; 8],
    pub faces: [Face; 6],
    pub center: Point,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub permx: f64,
    pub permy: f64,
    pub permz: f64,
    /// Unit vectors spanning the local frame of the cell.
    pub xvec: Vector,
    pub yvec: Vector,
    pub zvec: Vector,
    pub bbox: BoundingBox,
}

impl Cell {
    /// Builds a cell from its eight corners.
    ///
    /// Cell dimensions are the distances between the centroids of opposite
    /// faces, and the local axes point from the minus to the plus face.
    pub fn new(
        global_index: usize,
        ijk: (usize, usize, usize),
        corners: [Point; 8],
        perm: Permeability,
    ) -> Result<Self> {
        let center = Point::centroid(&corners);

        let mut faces = Vec::with_capacity(6);
        for (n, idx) in FACE_CORNERS.iter().enumerate() {
            let pts = [corners[idx[0]], corners[idx[1]], corners[idx[2]], corners[idx[3]]];
            let face = Face::new(pts, center).ok_or_else(|| {
                WellIndexError::InvalidGrid(format!(
                    "cell {global_index} has a degenerate face {n}"
                ))
            })?;
            faces.push(face);
        }
        let faces: [Face; 6] = [faces[0], faces[1], faces[2], faces[3], faces[4], faces[5]];

        let axis = |minus: usize, plus: usize| -> Result<(Vector, f64)> {
            let v = faces[plus].centroid - faces[minus].centroid;
            let unit = v.normalize().ok_or_else(|| {
                WellIndexError::InvalidGrid(format!("cell {global_index} has zero thickness"))
            })?;
            Ok((unit, v.length()))
        };
        let (xvec, dx) = axis(0, 1)?;
        let (yvec, dy) = axis(2, 3)?;
        let (zvec, dz) = axis(4, 5)?;
        // Eight corners, never empty
        let bbox = BoundingBox::from_points(&corners)
            .unwrap_or_else(|| BoundingBox::new(center, center));

        Ok(Self {
            global_index,
            ijk,
            corners,
            faces,
            center,
            dx,
            dy,
            dz,
            permx: perm.kx,
            permy: perm.ky,
            permz: perm.kz,
            xvec,
            yvec,
            zvec,
            bbox,
        })
    }

    /// Axis-aligned box from `origin` with sizes `(dx, dy, dz)`.
    pub fn from_box(
        global_index: usize,
        ijk: (usize, usize, usize),
        origin: Point,
        size: (f64, f64, f64),
        perm: Permeability,
    ) -> Result<Self> {
        let (sx, sy, sz) = size;
        let mut corners = [origin; 8];
        for (n, c) in corners.iter_mut().enumerate() {
            let (i, j, k) = ((n & 1) as f64, ((n >> 1) & 1) as f64, ((n >> 2) & 1) as f64);
            *c = origin + Vector::new(i * sx, j * sy, k * sz);
        }
        Self::new(global_index, ijk, corners, perm)
    }

    pub fn set_permeability(&mut self, perm: Permeability) {
        self.permx = perm.kx;
        self.permy = perm.ky;
        self.permz = perm.kz;
    }

    /// Checks whether the point lies on the interior side of all faces,
    /// within `tol`.
    pub fn contains(&self, ptest: Point, tol: f64) -> bool {
        // Quick rejection before the face tests
        if !self.bbox.contains(ptest, tol) {
            return false;
        }
        self.faces.iter().all(|f| f.point_on_same_side(ptest, tol))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}
