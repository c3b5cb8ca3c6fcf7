//! Permutations over orientation indices and group closure.
//!
//! Orientations are numbered so that each group element is identified by
//! the image of index 0: the element stored in slot `k` is the unique
//! permutation with `p(0) == k`, and slot 0 holds the identity.

use std::fmt;

use super::error::SymmetryError;

/// Bijection over `0..order`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    map: Vec<usize>,
}

impl Permutation {
    /// Validates that `map` is a bijection over `0..map.len()`.
    pub fn new(map: Vec<usize>) -> Result<Self, SymmetryError> {
        let n = map.len();
        let mut seen = vec![false; n];
        for &m in &map {
            if m >= n {
                return Err(SymmetryError::out_of_range(m, n));
            }
            if std::mem::replace(&mut seen[m], true) {
                return Err(SymmetryError::mismatched(format!("index {m} appears twice")));
            }
        }
        Ok(Self { map })
    }

    pub fn identity(order: usize) -> Self {
        Self {
            map: (0..order).collect(),
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.map.len()
    }

    pub fn map_index(&self, i: usize) -> Result<usize, SymmetryError> {
        self.map
            .get(i)
            .copied()
            .ok_or_else(|| SymmetryError::out_of_range(i, self.map.len()))
    }

    /// Unchecked image; callers hold `i < order`.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> usize {
        self.map[i]
    }

    /// The slot this permutation occupies in its group table.
    #[inline]
    pub fn image_of_zero(&self) -> usize {
        self.map[0]
    }

    /// Functional composition `self ∘ other`: apply `other` first.
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.order(), other.order());
        Self {
            map: other.map.iter().map(|&j| self.map[j]).collect(),
        }
    }

    pub fn inverse(&self) -> Self {
        let mut map = vec![0; self.map.len()];
        for (i, &j) in self.map.iter().enumerate() {
            map[j] = i;
        }
        Self { map }
    }

    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, &j)| i == j)
    }

    /// Number of applications needed to return to the identity.
    pub fn element_order(&self) -> usize {
        let mut k = 1;
        let mut j = self.map[0];
        while j != 0 {
            j = self.map[j];
            k += 1;
        }
        k
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation{:?}", self.map)
    }
}

/// Fill the group table by composing every known pair until a full pass
/// adds nothing or every slot is populated.
///
/// `slots[0]` must already hold the identity. Returns `(slot, i, j)` for
/// each permutation added, in discovery order, where the new element is
/// `slots[i] ∘ slots[j]`; callers replay it to build parallel tables.
pub(crate) fn close_group(slots: &mut [Option<Permutation>]) -> Vec<(usize, usize, usize)> {
    let order = slots.len();
    let mut derived = Vec::new();
    let mut filled = slots.iter().filter(|s| s.is_some()).count();
    let mut passes = 0;
    loop {
        passes += 1;
        let mut added = false;
        for i in 1..order {
            for j in 1..order {
                let (Some(p1), Some(p2)) = (&slots[i], &slots[j]) else {
                    continue;
                };
                let result = p1.at(p2.at(0));
                if slots[result].is_some() {
                    continue;
                }
                let composed = p1.compose(p2);
                slots[result] = Some(composed);
                derived.push((result, i, j));
                filled += 1;
                added = true;
            }
        }
        if !added || filled == order {
            break;
        }
    }
    tracing::debug!(order, filled, passes, "group closure");
    derived
}

/// Indices of the subgroup generated by `seeds`, ascending.
///
/// Work-list search: each newly found element is composed both ways with
/// every known element until nothing new appears.
pub(crate) fn closure_of(table: &[Permutation], seeds: &[usize]) -> Result<Vec<usize>, SymmetryError> {
    let order = table.len();
    let mut known: Vec<bool> = vec![false; order];
    let mut work = std::collections::VecDeque::new();
    for &s in seeds {
        if s >= order {
            return Err(SymmetryError::out_of_range(s, order));
        }
        if !std::mem::replace(&mut known[s], true) {
            work.push_back(s);
        }
    }
    while let Some(p) = work.pop_front() {
        for k in 0..order {
            if !known[k] {
                continue;
            }
            // slots[a] ∘ slots[b] lives at slots[a](b)
            for product in [table[p].at(k), table[k].at(p)] {
                if !std::mem::replace(&mut known[product], true) {
                    work.push_back(product);
                }
            }
        }
    }
    Ok((0..order).filter(|&i| known[i]).collect())
}
