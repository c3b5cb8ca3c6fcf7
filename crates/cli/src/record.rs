//! Export records: what an orbit table was computed from.
//!
//! Every `zome export` writes `<stem>.export.json` next to the table. The
//! record names the field (with its basis), the symmetry, the number format
//! the prototypes were written in and the orbits selected, so a table can be
//! regenerated or checked against a later library version.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use zome::prelude::*;

#[derive(Debug, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub order: usize,
    /// Irrational basis terms in the default format, e.g. `["φ"]`.
    pub irrationals: Vec<String>,
}

impl FieldInfo {
    pub fn of(field: &Field) -> Self {
        Self {
            name: field.name().to_string(),
            order: field.order(),
            irrationals: (1..field.order())
                .filter_map(|i| field.irrational(i, NumberFormat::Default).ok())
                .collect(),
        }
    }
}

/// Inputs of one orbit-table export.
#[derive(Debug, Serialize)]
pub struct ExportRecord {
    pub field: FieldInfo,
    pub symmetry: String,
    pub chiral_order: usize,
    pub format: String,
    /// Orbit names in table order; all built-in orbits unless a subset was
    /// requested.
    pub orbits: Vec<String>,
    pub subset: bool,
    pub table: PathBuf,
    pub zome_version: &'static str,
    pub code_rev: String,
}

impl ExportRecord {
    pub fn new(sym: &Symmetry, format: NumberFormat, orbits: Vec<String>, subset: bool, table: &Path) -> Self {
        Self {
            field: FieldInfo::of(sym.field()),
            symmetry: sym.name().to_string(),
            chiral_order: sym.chiral_order(),
            format: format.name().to_string(),
            orbits,
            subset,
            table: table.to_path_buf(),
            zome_version: zome::VERSION,
            code_rev: code_rev(),
        }
    }

    /// Write the record next to its table and return the record's path.
    pub fn write(&self) -> Result<PathBuf> {
        let path = record_path(&self.table);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), orbits = self.orbits.len(), "export record written");
        Ok(path)
    }
}

fn record_path(table: &Path) -> PathBuf {
    let stem = table
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "orbits".to_string());
    table.with_file_name(format!("{stem}.export.json"))
}

/// `GIT_COMMIT` if set (build time, then run time), else `git rev-parse`.
fn code_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|r| !r.is_empty()) {
        return rev.to_string();
    }
    if let Some(rev) = std::env::var("GIT_COMMIT").ok().filter(|r| !r.is_empty()) {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn record_sits_next_to_the_table() {
        assert_eq!(
            record_path(Path::new("/tmp/tables/golden.json")),
            Path::new("/tmp/tables/golden.export.json")
        );
        assert_eq!(record_path(Path::new("orbits")), Path::new("orbits.export.json"));
    }

    #[test]
    fn record_lists_field_basis_and_orbits() {
        let reg = Registry::with_defaults().unwrap();
        let sym = reg.symmetry("sqrtPhi", SymmetryKind::Icosahedral).unwrap();
        let dir = tempdir().unwrap();
        let table = dir.path().join("sqrtphi.json");
        let record = ExportRecord::new(&sym, NumberFormat::Zomic, vec!["blue".into(), "red".into()], true, &table);
        let path = record.write().unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["field"]["name"], "sqrtPhi");
        assert_eq!(parsed["field"]["irrationals"], serde_json::json!(["φ", "√φ", "φ√φ"]));
        assert_eq!(parsed["symmetry"], "icosahedral");
        assert_eq!(parsed["chiral_order"], 60);
        assert_eq!(parsed["format"], "zomic");
        assert_eq!(parsed["orbits"], serde_json::json!(["blue", "red"]));
        assert_eq!(parsed["subset"], true);
        assert_eq!(parsed["zome_version"], zome::VERSION);
    }
}
