//! Explicitly owned table of fields and the symmetries built over them.
//!
//! Build one `Registry` at startup and hand it (or an `Arc` of it) to the
//! loaders and tools that resolve fields by name. Symmetries are built on
//! first request; every later request, from any thread, gets the same
//! `Arc<Symmetry>` without locking.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::algebra::{AlgebraError, Field, GoldenField, PolygonField, SqrtField, SqrtPhiField};
use crate::symmetry::{Symmetry, SymmetryError, SymmetryKind};

type Slot = OnceLock<Result<Arc<Symmetry>, SymmetryError>>;

#[derive(Default)]
pub struct Registry {
    fields: BTreeMap<String, Field>,
    symmetries: HashMap<(String, SymmetryKind), Slot>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// golden, rootTwo, rootThree, rootFive, heptagon and sqrtPhi.
    pub fn with_defaults() -> Result<Self, AlgebraError> {
        let mut reg = Self::new();
        reg.register(Field::new(GoldenField));
        for n in [2, 3, 5] {
            reg.register(Field::new(SqrtField::new(n)?));
        }
        reg.register(Field::new(PolygonField::new(7)?));
        reg.register(Field::new(SqrtPhiField));
        Ok(reg)
    }

    /// Add a field under its own name, returning the field it replaced.
    /// Symmetries built over a replaced field are dropped.
    pub fn register(&mut self, field: Field) -> Option<Field> {
        let name = field.name().to_string();
        self.symmetries.retain(|(f, _), _| *f != name);
        for kind in SymmetryKind::ALL {
            if kind.supports(&field) {
                self.symmetries.insert((name.clone(), kind), OnceLock::new());
            }
        }
        tracing::debug!(field = %name, "field registered");
        self.fields.insert(name, field)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Registered field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Symmetry kinds available over a field.
    pub fn symmetry_kinds(&self, field: &str) -> Vec<SymmetryKind> {
        SymmetryKind::ALL
            .into_iter()
            .filter(|&k| self.symmetries.contains_key(&(field.to_string(), k)))
            .collect()
    }

    /// The symmetry of `kind` over the named field, built on first use.
    pub fn symmetry(&self, field: &str, kind: SymmetryKind) -> Result<Arc<Symmetry>, SymmetryError> {
        let Some(f) = self.fields.get(field) else {
            return Err(SymmetryError::UnknownField {
                name: field.to_string(),
            });
        };
        let Some(slot) = self.symmetries.get(&(field.to_string(), kind)) else {
            return Err(SymmetryError::Field(AlgebraError::unsupported(format!(
                "{kind} symmetry is not available over {field}"
            ))));
        };
        slot.get_or_init(|| {
            tracing::debug!(field, symmetry = %kind, "building symmetry");
            Symmetry::build(kind.definition(), f).map(Arc::new)
        })
        .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn defaults_cover_the_common_fields() {
        let reg = Registry::with_defaults().unwrap();
        assert_eq!(
            reg.field_names().collect::<Vec<_>>(),
            ["golden", "heptagon", "rootFive", "rootThree", "rootTwo", "sqrtPhi"]
        );
        assert_eq!(reg.field("golden").unwrap().order(), 2);
        assert_eq!(reg.field("sqrtPhi").unwrap().order(), 4);
        assert!(reg.field("cubic").is_none());
        assert_eq!(
            reg.symmetry_kinds("golden"),
            [SymmetryKind::Icosahedral, SymmetryKind::Octahedral]
        );
        assert_eq!(reg.symmetry_kinds("rootTwo"), [SymmetryKind::Octahedral]);
    }

    #[test]
    fn symmetry_lookup_errors() {
        let reg = Registry::with_defaults().unwrap();
        assert_eq!(
            reg.symmetry("cubic", SymmetryKind::Octahedral).unwrap_err(),
            SymmetryError::UnknownField {
                name: "cubic".into()
            }
        );
        assert!(matches!(
            reg.symmetry("heptagon", SymmetryKind::Icosahedral),
            Err(SymmetryError::Field(AlgebraError::UnsupportedField { .. }))
        ));
    }

    #[test]
    fn concurrent_requests_share_one_build() {
        let reg = Arc::new(Registry::with_defaults().unwrap());
        let built: Vec<Arc<Symmetry>> = (0..4)
            .map(|_| {
                let reg = Arc::clone(&reg);
                thread::spawn(move || reg.symmetry("golden", SymmetryKind::Icosahedral).unwrap())
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();
        assert!(built.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(built[0].chiral_order(), 60);
        assert!(Arc::ptr_eq(
            &built[0],
            &reg.symmetry("golden", SymmetryKind::Icosahedral).unwrap()
        ));
    }

    #[test]
    fn re_registering_drops_built_symmetries() {
        let mut reg = Registry::with_defaults().unwrap();
        let first = reg.symmetry("rootTwo", SymmetryKind::Octahedral).unwrap();
        let old = reg.register(Field::new(SqrtField::new(2).unwrap()));
        assert!(old.is_some());
        let second = reg.symmetry("rootTwo", SymmetryKind::Octahedral).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.chiral_order(), 24);
    }
}
