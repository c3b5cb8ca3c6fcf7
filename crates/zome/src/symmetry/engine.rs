//! The symmetry engine: orientation table, orbits, and axis lookup.
//!
//! Build
//! - The orbit of a chiral prototype `w` (a point strictly inside one
//!   fundamental chamber) under the generators numbers the orientations:
//!   orientation `k` is the rotation taking `w` to the `k`-th point found.
//! - Each generator becomes a permutation of those indices, stored in the
//!   slot of its image of 0; `close_group` fills the remaining slots and the
//!   matrices follow the same derivations.
//!
//! Axes
//! - Every orbit keeps one representative `c` inside the closed chamber.
//!   The axis at `(sense, k)` has normal `±M_k·c`. Because the chamber is a
//!   fundamental domain of the full group (rotations and central
//!   inversion), a direction inside the region of `(sense, k)` can only be
//!   matched by the axis at `(sense, k)` of any orbit. This is what makes
//!   the chiral-orbit lookup agree with brute force.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

use nalgebra::{Matrix3, Vector3};

use crate::algebra::{
    are_parallel, AlgebraError, AlgebraicMatrix, AlgebraicNumber, AlgebraicVector, Field,
};
use crate::cfg::{PARALLEL_EPS, REAL_ZERO_EPS, TIE_EPS};

use super::defs::{SymmetryDefinition, SymmetryKind};
use super::error::SymmetryError;
use super::orbit::{
    Axis, AxisMap, Direction, OrbitDot, OrbitId, OrbitSet, OrbitSpec, Sense, SpecialOrbit,
};
use super::permutation::{close_group, closure_of, Permutation};

#[derive(Clone)]
pub struct Symmetry {
    name: String,
    field: Field,
    permutations: Vec<Permutation>,
    matrices: Vec<AlgebraicMatrix>,
    inverses: Vec<usize>,
    real_matrices: Vec<Matrix3<f64>>,
    /// Unit real images of the chiral prototype, by orientation.
    chiral_axes: Vec<Vector3<f64>>,
    /// Inverse of the matrix whose columns are the chamber vertices.
    chamber_inverse: AlgebraicMatrix,
    orbits: BTreeMap<OrbitId, Direction>,
    by_name: HashMap<String, OrbitId>,
    orbit_set: OrbitSet,
    special: Vec<(SpecialOrbit, String)>,
    next_id: u32,
    next_auto: usize,
    triangle_basis: OnceLock<Option<Matrix3<f64>>>,
}

impl Symmetry {
    pub fn icosahedral(field: &Field) -> Result<Self, SymmetryError> {
        Self::build(SymmetryKind::Icosahedral.definition(), field)
    }

    pub fn octahedral(field: &Field) -> Result<Self, SymmetryError> {
        Self::build(SymmetryKind::Octahedral.definition(), field)
    }

    /// Build the group described by `def` over `field`.
    pub fn build(def: &dyn SymmetryDefinition, field: &Field) -> Result<Self, SymmetryError> {
        if !def.supports(field) {
            return Err(SymmetryError::Field(AlgebraError::unsupported(format!(
                "{} symmetry is not available over {field}",
                def.name()
            ))));
        }
        let order = def.order();
        let generators = def.generators(field)?;
        let w = def.chiral_prototype(field)?;

        // Number the orientations by the orbit of w.
        let mut points = vec![w.clone()];
        let mut index: HashMap<AlgebraicVector, usize> = HashMap::from([(w, 0)]);
        let mut cursor = 0;
        while cursor < points.len() {
            for g in &generators {
                let image = g.times_column(&points[cursor])?;
                if index.contains_key(&image) {
                    continue;
                }
                if points.len() == order {
                    return Err(SymmetryError::IncompleteGroup {
                        found: order + 1,
                        order,
                    });
                }
                index.insert(image.clone(), points.len());
                points.push(image);
            }
            cursor += 1;
        }
        if points.len() != order {
            return Err(SymmetryError::IncompleteGroup {
                found: points.len(),
                order,
            });
        }

        let mut slots: Vec<Option<Permutation>> = vec![None; order];
        let mut mats: Vec<Option<AlgebraicMatrix>> = vec![None; order];
        slots[0] = Some(Permutation::identity(order));
        mats[0] = Some(field.identity_matrix(3));
        for g in generators {
            let map = points
                .iter()
                .map(|p| -> Result<usize, SymmetryError> {
                    let image = g.times_column(p)?;
                    index
                        .get(&image)
                        .copied()
                        .ok_or(SymmetryError::IncompleteGroup {
                            found: points.len(),
                            order,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let perm = Permutation::new(map)?;
            let slot = perm.image_of_zero();
            if slots[slot].is_none() {
                slots[slot] = Some(perm);
                mats[slot] = Some(g);
            }
        }

        for (r, i, j) in close_group(&mut slots) {
            if let (Some(a), Some(b)) = (&mats[i], &mats[j]) {
                mats[r] = Some(a.times(b)?);
            }
        }
        let found = slots.iter().filter(|s| s.is_some()).count();
        let (Some(permutations), Some(matrices)) = (
            slots.into_iter().collect::<Option<Vec<_>>>(),
            mats.into_iter().collect::<Option<Vec<_>>>(),
        ) else {
            tracing::warn!(symmetry = def.name(), found, order, "closure left empty slots");
            return Err(SymmetryError::IncompleteGroup { found, order });
        };

        let inverses = permutations
            .iter()
            .map(|p| p.inverse().image_of_zero())
            .collect();
        let real_matrices = matrices
            .iter()
            .map(AlgebraicMatrix::to_real_matrix3)
            .collect::<Result<Vec<_>, _>>()?;
        let chiral_axes = points
            .iter()
            .map(|p| real_direction(p).unwrap_or_else(Vector3::zeros))
            .collect();
        let chamber_inverse = AlgebraicMatrix::from_columns(&def.chamber(field)?)?.inverse()?;

        let mut sym = Self {
            name: def.name().to_string(),
            field: field.clone(),
            permutations,
            matrices,
            inverses,
            real_matrices,
            chiral_axes,
            chamber_inverse,
            orbits: BTreeMap::new(),
            by_name: HashMap::new(),
            orbit_set: OrbitSet::new(),
            special: def
                .special_orbits()
                .into_iter()
                .map(|(role, name)| (role, name.to_string()))
                .collect(),
            next_id: 0,
            next_auto: 0,
            triangle_basis: OnceLock::new(),
        };
        for spec in def.orbits(field)? {
            sym.create_zone_orbit(spec)?;
        }
        tracing::debug!(
            symmetry = %sym.name,
            field = %field,
            order,
            orbits = sym.orbits.len(),
            "symmetry built"
        );
        Ok(sym)
    }

    // ------------------------------------------------------------ group

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Number of rotations.
    pub fn chiral_order(&self) -> usize {
        self.permutations.len()
    }

    fn check_index(&self, i: usize) -> Result<(), SymmetryError> {
        if i < self.chiral_order() {
            Ok(())
        } else {
            Err(SymmetryError::out_of_range(i, self.chiral_order()))
        }
    }

    pub fn permutation(&self, i: usize) -> Result<&Permutation, SymmetryError> {
        self.check_index(i)?;
        Ok(&self.permutations[i])
    }

    pub fn permutations(&self) -> &[Permutation] {
        &self.permutations
    }

    pub fn matrix(&self, i: usize) -> Result<&AlgebraicMatrix, SymmetryError> {
        self.check_index(i)?;
        Ok(&self.matrices[i])
    }

    pub fn inverse(&self, orientation: usize) -> Result<usize, SymmetryError> {
        self.check_index(orientation)?;
        Ok(self.inverses[orientation])
    }

    /// Orientation of `M_a · M_b`.
    pub fn compose(&self, a: usize, b: usize) -> Result<usize, SymmetryError> {
        self.check_index(a)?;
        self.check_index(b)?;
        Ok(self.permutations[a].at(b))
    }

    /// The orientation whose permutation sends `from` to `to`.
    pub fn get_mapping(&self, from: usize, to: Option<usize>) -> Option<usize> {
        let to = to?;
        if from >= self.chiral_order() {
            return None;
        }
        (0..self.chiral_order()).find(|&p| self.permutations[p].at(from) == to)
    }

    /// Orientations of the subgroup generated by `seeds`, ascending.
    pub fn closure(&self, seeds: &[usize]) -> Result<Vec<usize>, SymmetryError> {
        closure_of(&self.permutations, seeds)
    }

    pub fn embed_in_r3(&self, v: &AlgebraicVector) -> Vector3<f64> {
        v.to_3d_double_vector()
    }

    // ----------------------------------------------------------- orbits

    /// Every orbit, in creation order.
    pub fn orbit_set(&self) -> &OrbitSet {
        &self.orbit_set
    }

    pub fn orbits(&self) -> impl Iterator<Item = &Direction> {
        self.orbits.values()
    }

    pub fn orbit(&self, id: OrbitId) -> Result<&Direction, SymmetryError> {
        self.orbits.get(&id).ok_or_else(|| SymmetryError::UnknownOrbit {
            name: format!("#{}", id.index()),
        })
    }

    pub fn direction(&self, name: &str) -> Option<&Direction> {
        self.by_name.get(name).and_then(|id| self.orbits.get(id))
    }

    pub fn special_orbit(&self, role: SpecialOrbit) -> Option<&Direction> {
        self.special
            .iter()
            .find(|(r, _)| *r == role)
            .and_then(|(_, name)| self.direction(name))
    }

    /// Names of the user-visible orbits, in creation order.
    pub fn direction_names(&self) -> Vec<&str> {
        self.orbits
            .values()
            .filter(|d| !d.automatic)
            .map(|d| d.name.as_str())
            .collect()
    }

    /// Prototypes of the blue, red and yellow orbits.
    pub fn orbit_triangle(&self) -> Option<[AlgebraicVector; 3]> {
        let vertex = |role| self.special_orbit(role).map(|d| d.prototype.clone());
        Some([
            vertex(SpecialOrbit::Blue)?,
            vertex(SpecialOrbit::Red)?,
            vertex(SpecialOrbit::Yellow)?,
        ])
    }

    /// Add an orbit, replacing any orbit of the same name.
    pub fn create_zone_orbit(&mut self, spec: OrbitSpec) -> Result<OrbitId, SymmetryError> {
        self.check_vector(&spec.prototype)?;
        if spec.prototype.is_origin() {
            return Err(SymmetryError::degenerate("orbit prototype is the origin"));
        }
        let (canonical, sense, k) = self.chamber_rep(&spec.prototype)?;
        let rotation = self.stabilizer_generator(&canonical)?;
        let rotated_prototype = rotation.map(|r| self.rotation_at(r, sense, k));
        let c = real_direction(&canonical).unwrap_or_else(Vector3::zeros);
        let real_axes = self.real_matrices.iter().map(|m| m * c).collect();

        if let Some(old) = self.by_name.remove(&spec.name) {
            self.orbits.remove(&old);
            self.orbit_set.remove(old);
            tracing::debug!(orbit = %spec.name, "orbit replaced");
        }
        let id = OrbitId(self.next_id);
        self.next_id += 1;
        let direction = Direction {
            id,
            name: spec.name.clone(),
            prototype: spec.prototype,
            canonical,
            prototype_axis: (sense, k),
            rotation,
            rotated_prototype,
            unit_length: spec.unit_length.unwrap_or_else(|| self.field.one()),
            half_sizes: spec.half_sizes,
            automatic: spec.automatic,
            real_axes,
            dot: OnceLock::new(),
        };
        tracing::debug!(
            orbit = %direction.name,
            id = id.index(),
            automatic = direction.automatic,
            "orbit created"
        );
        self.by_name.insert(spec.name, id);
        self.orbits.insert(id, direction);
        self.orbit_set.insert(id);
        Ok(id)
    }

    /// The axis along `v`, creating an automatic orbit when no existing
    /// orbit contains that direction.
    pub fn ensure_orbit(&mut self, v: &AlgebraicVector) -> Result<Axis, SymmetryError> {
        if let Some(axis) = self.get_axis(v, None)? {
            return Ok(axis);
        }
        if v.is_origin() {
            return Err(SymmetryError::degenerate("cannot create an orbit for the origin"));
        }
        let name = loop {
            let candidate = format!("a{}", self.next_auto);
            self.next_auto += 1;
            if !self.by_name.contains_key(&candidate) {
                break candidate;
            }
        };
        let id = self.create_zone_orbit(OrbitSpec::new(name, v.clone()).automatic(true))?;
        let dir = self.orbit(id)?;
        let (sense, k) = dir.prototype_axis;
        self.axis_in(dir, sense, k)
    }

    // ------------------------------------------------------------- axes

    pub fn axis(&self, orbit: OrbitId, sense: Sense, orientation: usize) -> Result<Axis, SymmetryError> {
        self.check_index(orientation)?;
        self.axis_in(self.orbit(orbit)?, sense, orientation)
    }

    /// Distinct axes of one orbit, in `(sense, orientation)` order.
    pub fn orbit_axes(&self, orbit: OrbitId) -> Result<Vec<Axis>, SymmetryError> {
        let dir = self.orbit(orbit)?;
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for sense in Sense::BOTH {
            for k in 0..self.chiral_order() {
                let axis = self.axis_in(dir, sense, k)?;
                if seen.insert(axis.normal.clone()) {
                    out.push(axis);
                }
            }
        }
        Ok(out)
    }

    /// Axis exactly parallel to `v` (same direction), found through the
    /// chiral orbit when the symmetry has one. `None` for the origin or
    /// when no selected orbit contains the direction.
    pub fn get_axis(
        &self,
        v: &AlgebraicVector,
        orbits: Option<&OrbitSet>,
    ) -> Result<Option<Axis>, SymmetryError> {
        if self.special_orbit(SpecialOrbit::Black).is_none() {
            return self.get_axis_brute_force(v, orbits);
        }
        self.check_vector(v)?;
        if v.is_origin() {
            return Ok(None);
        }
        let Some(direction) = real_direction(v) else {
            return self.get_axis_brute_force(v, orbits);
        };
        let regions = self.chiral_regions(&direction);
        for dir in self.selected(orbits) {
            for &(sense, k) in &regions {
                let axis = self.axis_in(dir, sense, k)?;
                if points_along(&axis.normal, v)? {
                    return Ok(Some(axis));
                }
            }
        }
        Ok(None)
    }

    /// Same contract as `get_axis`, testing every axis of every orbit.
    pub fn get_axis_brute_force(
        &self,
        v: &AlgebraicVector,
        orbits: Option<&OrbitSet>,
    ) -> Result<Option<Axis>, SymmetryError> {
        self.check_vector(v)?;
        if v.is_origin() {
            return Ok(None);
        }
        let target = real_direction(v);
        for dir in self.selected(orbits) {
            for sense in Sense::BOTH {
                for (k, real) in dir.real_axes.iter().enumerate() {
                    if target.is_some_and(|t| sense.sign() * real.dot(&t) < 1.0 - PARALLEL_EPS) {
                        continue;
                    }
                    let axis = self.axis_in(dir, sense, k)?;
                    if points_along(&axis.normal, v)? {
                        return Ok(Some(axis));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Axis with the largest cosine to a real direction. With a chiral
    /// orbit only the axis at the nearest fundamental region of each orbit
    /// is considered.
    pub fn nearest_axis(
        &self,
        v: &Vector3<f64>,
        orbits: Option<&OrbitSet>,
    ) -> Result<Option<Axis>, SymmetryError> {
        if self.special_orbit(SpecialOrbit::Black).is_none() {
            return self.nearest_axis_brute_force(v, orbits);
        }
        let Some(target) = real_query(v) else {
            return Ok(None);
        };
        let Some(&(sense, k)) = self.chiral_regions(&target).first() else {
            return Ok(None);
        };
        let mut best: Option<(f64, &Direction)> = None;
        for dir in self.selected(orbits) {
            let cosine = sense.sign() * dir.real_axes[k].dot(&target);
            if best.map_or(true, |(b, _)| cosine > b) {
                best = Some((cosine, dir));
            }
        }
        best.map(|(_, dir)| self.axis_in(dir, sense, k)).transpose()
    }

    pub fn nearest_axis_brute_force(
        &self,
        v: &Vector3<f64>,
        orbits: Option<&OrbitSet>,
    ) -> Result<Option<Axis>, SymmetryError> {
        let Some(target) = real_query(v) else {
            return Ok(None);
        };
        let mut best: Option<(f64, &Direction, Sense, usize)> = None;
        for dir in self.selected(orbits) {
            for sense in Sense::BOTH {
                for (k, real) in dir.real_axes.iter().enumerate() {
                    let cosine = sense.sign() * real.dot(&target);
                    if best.map_or(true, |(b, ..)| cosine > b) {
                        best = Some((cosine, dir, sense, k));
                    }
                }
            }
        }
        best.map(|(_, dir, sense, k)| self.axis_in(dir, sense, k))
            .transpose()
    }

    /// Image of `axis` under rotation `orientation`.
    pub fn rotate_axis(&self, axis: &Axis, orientation: usize) -> Result<Axis, SymmetryError> {
        self.check_index(orientation)?;
        self.check_index(axis.orientation)?;
        let dir = self.orbit(axis.orbit)?;
        let k = self.permutations[orientation].at(axis.orientation);
        self.axis_in(dir, axis.sense, k)
    }

    /// Orientation of the rotation about `axis` that generates its
    /// stabilizer; `None` for axes without rotational symmetry. The
    /// negative sense gets the inverse rotation.
    pub fn axis_rotation(&self, axis: &Axis) -> Result<Option<usize>, SymmetryError> {
        self.check_index(axis.orientation)?;
        let dir = self.orbit(axis.orbit)?;
        Ok(dir
            .rotation
            .map(|r| self.rotation_at(r, axis.sense, axis.orientation)))
    }

    pub fn map_axis(&self, from: &Axis, to: &Axis) -> Result<AxisMap, SymmetryError> {
        self.map_axes(std::slice::from_ref(from), std::slice::from_ref(to))
    }

    /// One group element taking every `from[i]` to `to[i]`: rotations are
    /// tried first, then rotations composed with the central inversion.
    pub fn map_axes(&self, from: &[Axis], to: &[Axis]) -> Result<AxisMap, SymmetryError> {
        if from.len() != to.len() {
            return Err(SymmetryError::mismatched("must map to equal number of axes"));
        }
        if from.len() > 3 {
            return Err(SymmetryError::mismatched("must map three or fewer axes"));
        }
        if from.iter().zip(to).any(|(f, t)| f.orbit != t.orbit) {
            return Err(SymmetryError::mismatched("must map between same color axes"));
        }
        for axes in [from, to] {
            for (i, a) in axes.iter().enumerate() {
                if axes[i + 1..].iter().any(|b| b.orbit == a.orbit) {
                    return Err(SymmetryError::mismatched("axes must come from distinct orbits"));
                }
            }
        }
        for inverted in [false, true] {
            for g in 0..self.chiral_order() {
                let mut hit = true;
                for (f, t) in from.iter().zip(to) {
                    let image = self.rotate_axis(f, g)?;
                    let normal = if inverted { image.normal.negate() } else { image.normal };
                    if normal != t.normal {
                        hit = false;
                        break;
                    }
                }
                if hit {
                    return Ok(AxisMap {
                        orientation: g,
                        inverted,
                    });
                }
            }
        }
        Err(SymmetryError::mismatched("map is impossible"))
    }

    // ------------------------------------------------------------- dots

    /// Location of the orbit inside the blue/red/yellow triangle; computed
    /// once per orbit.
    pub fn orbit_dot(&self, id: OrbitId) -> Option<OrbitDot> {
        let dir = self.orbits.get(&id)?;
        *dir.dot.get_or_init(|| self.locate_dot(&dir.canonical))
    }

    /// Dots of every orbit, in creation order.
    pub fn orbit_dots(&self) -> Vec<(OrbitId, Option<OrbitDot>)> {
        self.orbits.keys().map(|&id| (id, self.orbit_dot(id))).collect()
    }

    fn locate_dot(&self, canonical: &AlgebraicVector) -> Option<OrbitDot> {
        let basis = self
            .triangle_basis
            .get_or_init(|| {
                let [b, r, y] = self.orbit_triangle()?;
                Matrix3::from_columns(&[real_direction(&b)?, real_direction(&r)?, real_direction(&y)?])
                .try_inverse()
            })
            .as_ref()?;
        let weights = basis * real_direction(canonical)?;
        let total = weights.sum();
        if total.abs() < TIE_EPS {
            return None;
        }
        let (red, yellow) = (weights.y / total, weights.z / total);
        Some(OrbitDot {
            x: red + 0.5 * yellow,
            y: yellow * 3f64.sqrt() / 2.0,
        })
    }

    // --------------------------------------------------------- internal

    fn check_vector(&self, v: &AlgebraicVector) -> Result<(), SymmetryError> {
        if v.dims() != 3 {
            return Err(SymmetryError::degenerate(format!("expected 3 dims, found {}", v.dims())));
        }
        if *v.field() != self.field {
            return Err(SymmetryError::degenerate(format!(
                "vector over {} in a symmetry over {}",
                v.field(),
                self.field
            )));
        }
        Ok(())
    }

    fn selected<'a>(&'a self, orbits: Option<&'a OrbitSet>) -> impl Iterator<Item = &'a Direction> + 'a {
        orbits
            .unwrap_or(&self.orbit_set)
            .iter()
            .filter_map(move |id| self.orbits.get(&id))
    }

    fn axis_in(&self, dir: &Direction, sense: Sense, orientation: usize) -> Result<Axis, SymmetryError> {
        let normal = self.matrices[orientation].times_column(&dir.canonical)?;
        let normal = match sense {
            Sense::Plus => normal,
            Sense::Minus => normal.negate(),
        };
        Ok(Axis {
            orbit: dir.id,
            sense,
            orientation,
            normal,
        })
    }

    /// Fundamental regions nearest to a real direction, best first: the
    /// best one plus every region whose cosine ties it within `TIE_EPS`.
    fn chiral_regions(&self, v: &Vector3<f64>) -> Vec<(Sense, usize)> {
        let target = v.normalize();
        let mut scored: Vec<(f64, Sense, usize)> = Sense::BOTH
            .iter()
            .flat_map(|&sense| {
                self.chiral_axes
                    .iter()
                    .enumerate()
                    .map(move |(k, a)| (sense.sign() * a.dot(&target), sense, k))
            })
            .collect();
        let best = scored.iter().map(|s| s.0).fold(f64::NEG_INFINITY, f64::max);
        scored.retain(|s| s.0 >= best - TIE_EPS);
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, s, k)| (s, k)).collect()
    }

    /// `(c, sense, k)` with `c` in the closed chamber and `p = sense·M_k·c`.
    fn chamber_rep(&self, p: &AlgebraicVector) -> Result<(AlgebraicVector, Sense, usize), SymmetryError> {
        let near = real_direction(p)
            .map(|d| self.chiral_regions(&d))
            .unwrap_or_default();
        let all = Sense::BOTH
            .into_iter()
            .flat_map(|s| (0..self.chiral_order()).map(move |k| (s, k)));
        for (sense, k) in near.into_iter().chain(all) {
            let c = self.matrices[self.inverses[k]].times_column(p)?;
            let c = match sense {
                Sense::Plus => c,
                Sense::Minus => c.negate(),
            };
            if self.in_chamber(&c)? {
                return Ok((c, sense, k));
            }
        }
        Err(SymmetryError::degenerate(format!("no fundamental region contains {p}")))
    }

    fn in_chamber(&self, c: &AlgebraicVector) -> Result<bool, SymmetryError> {
        let weights = self.chamber_inverse.times_column(c)?;
        Ok(weights.coords().iter().all(|w| w.signum() >= 0))
    }

    /// Highest-order rotation fixing `c` (lowest index among equals).
    fn stabilizer_generator(&self, c: &AlgebraicVector) -> Result<Option<usize>, SymmetryError> {
        let mut best: Option<(usize, usize)> = None;
        for i in 1..self.chiral_order() {
            if self.matrices[i].times_column(c)? != *c {
                continue;
            }
            let order = self.permutations[i].element_order();
            if best.map_or(true, |(o, _)| order > o) {
                best = Some((order, i));
            }
        }
        Ok(best.map(|(_, i)| i))
    }

    /// Rotation `r` about the representative, carried to the axis at
    /// `(sense, k)`: `M_k·M_r·M_k⁻¹`, inverted for the negative sense.
    fn rotation_at(&self, r: usize, sense: Sense, k: usize) -> usize {
        let conj = self.permutations[k].at(self.permutations[r].at(self.inverses[k]));
        match sense {
            Sense::Plus => conj,
            Sense::Minus => self.inverses[conj],
        }
    }
}

/// Unit real direction of an exact vector. Coordinates are first divided
/// exactly by the largest one, so powers of φ far outside the f64 range
/// still embed; `None` for the origin.
fn real_direction(v: &AlgebraicVector) -> Option<Vector3<f64>> {
    let direct = v.to_3d_double_vector();
    let squared = direct.norm_squared();
    if squared.is_normal() {
        return Some(direct / squared.sqrt());
    }
    let magnitude = |c: &AlgebraicNumber| if c.signum() < 0 { c.negate() } else { c.clone() };
    let largest = v.coords().iter().map(magnitude).max()?;
    let scaled = v.scale(&largest.reciprocal().ok()?).to_3d_double_vector();
    let norm = scaled.norm();
    norm.is_normal().then(|| scaled / norm)
}

/// Unit query direction; `None` for the origin and for non-finite input.
fn real_query(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    if !v.iter().all(|x| x.is_finite()) || v.norm_squared() < REAL_ZERO_EPS {
        return None;
    }
    Some((v / v.amax()).normalize())
}

/// Exactly parallel and pointing the same way.
fn points_along(normal: &AlgebraicVector, v: &AlgebraicVector) -> Result<bool, SymmetryError> {
    Ok(are_parallel(normal, v) && normal.dot(v)?.signum() > 0)
}

impl fmt::Debug for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symmetry")
            .field("name", &self.name)
            .field("field", &self.field.name())
            .field("order", &self.chiral_order())
            .field("orbits", &self.direction_names())
            .finish()
    }
}
