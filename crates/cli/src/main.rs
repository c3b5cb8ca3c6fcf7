use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Vector3;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use zome::prelude::*;

mod record;

use record::ExportRecord;

#[derive(Parser)]
#[command(name = "zome")]
#[command(about = "Inspect algebraic fields and zome symmetries")]
struct Cmd {
    /// Field name (golden, rootTwo, rootThree, rootFive, heptagon, sqrtPhi)
    #[arg(long, global = true, default_value = "golden")]
    field: String,

    /// Symmetry group (icosahedral, octahedral)
    #[arg(long, global = true, default_value = "icosahedral")]
    symmetry: SymmetryKind,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List registered fields and the symmetries each supports
    Fields,
    /// Parse a number or vector and print it in every format
    Parse {
        input: String,
        /// default, expression, zomic, vef (or 0-3); any number format when omitted
        #[arg(long)]
        format: Option<NumberFormat>,
        /// Parse a vector instead of a single number
        #[arg(long)]
        vector: bool,
    },
    /// Print the orbit table of a symmetry as JSON
    Symmetry,
    /// Find the axis along an exact vector, or nearest to a real direction
    Axis {
        /// Exact vector in the default format, e.g. "(1, 0, φ)"
        vector: Option<String>,
        /// Real direction for a nearest-axis search, e.g. --real=0.1,-0.2,1
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        real: Option<Vec<f64>>,
    },
    /// Write the orbit table to a JSON file plus an export record
    Export {
        #[arg(long)]
        out: PathBuf,
        /// Number format of the prototypes
        #[arg(long, default_value_t = NumberFormat::Default)]
        format: NumberFormat,
        /// Only these orbits, e.g. --orbits=blue,red
        #[arg(long, value_delimiter = ',')]
        orbits: Option<Vec<String>>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let registry = Registry::with_defaults()?;
    match cmd.action {
        Action::Fields => {
            for line in field_lines(&registry) {
                println!("{line}");
            }
            Ok(())
        }
        Action::Parse {
            input,
            format,
            vector,
        } => {
            let field = lookup_field(&registry, &cmd.field)?;
            for (name, text) in render(field, &input, format, vector)? {
                println!("{name:<10} {text}");
            }
            Ok(())
        }
        Action::Symmetry => {
            let report = symmetry_report(&registry, &cmd.field, cmd.symmetry, NumberFormat::Default, None)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Action::Axis { vector, real } => {
            match find_axis(&registry, &cmd.field, cmd.symmetry, vector.as_deref(), real.as_deref())? {
                Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                None => println!("no axis"),
            }
            Ok(())
        }
        Action::Export { out, format, orbits } => {
            let record = export(&registry, &cmd.field, cmd.symmetry, format, orbits.as_deref(), &out)?;
            tracing::info!(out = %out.display(), record = %record.display(), "export");
            Ok(())
        }
    }
}

fn lookup_field<'a>(registry: &'a Registry, name: &str) -> Result<&'a Field> {
    registry
        .field(name)
        .ok_or_else(|| anyhow!("unknown field {name:?} (see `zome fields`)"))
}

fn field_lines(registry: &Registry) -> Vec<String> {
    let mut lines = Vec::new();
    for name in registry.field_names() {
        let Some(field) = registry.field(name) else {
            continue;
        };
        let symbols: Vec<String> = (1..field.order())
            .filter_map(|i| field.irrational(i, NumberFormat::Default).ok())
            .collect();
        let kinds: Vec<&str> = registry
            .symmetry_kinds(name)
            .into_iter()
            .map(SymmetryKind::name)
            .collect();
        lines.push(format!(
            "{name:<10} order={} basis=1,{} symmetries={}",
            field.order(),
            symbols.join(","),
            kinds.join(",")
        ));
        for m in 0..field.num_multipliers() {
            if let Ok(def) = field.define_multiplier(m) {
                lines.push(format!("    {def}"));
            }
        }
    }
    lines
}

/// `(format name, text)` for every format, plus the real value of a number.
fn render(
    field: &Field,
    input: &str,
    format: Option<NumberFormat>,
    vector: bool,
) -> Result<Vec<(String, String)>> {
    if vector {
        let v = field.parse_vector(input, format.unwrap_or_default())?;
        let mut out: Vec<(String, String)> = NumberFormat::ALL
            .into_iter()
            .map(|f| (f.name().to_string(), v.to_string_format(f)))
            .collect();
        out.push(("real".into(), format!("{:?}", v.to_real_vector().as_slice())));
        return Ok(out);
    }
    let n = match format {
        Some(f) => field.parse_number(input, f)?,
        None => field.parse_legacy_number(input)?,
    };
    let mut out: Vec<(String, String)> = NumberFormat::ALL
        .into_iter()
        .map(|f| (f.name().to_string(), n.to_string_format(f)))
        .collect();
    out.push(("real".into(), n.evaluate().to_string()));
    Ok(out)
}

#[derive(Debug, Serialize)]
struct OrbitRow {
    name: String,
    prototype: String,
    axes: usize,
    /// Order of the rotation about the prototype axis (1 when none).
    fold: usize,
    half_sizes: bool,
    automatic: bool,
    dot: Option<[f64; 2]>,
}

#[derive(Debug, Serialize)]
struct SymmetryReport {
    symmetry: String,
    field: String,
    order: usize,
    orbits: Vec<OrbitRow>,
}

/// Orbit table of a symmetry, optionally restricted to the named orbits.
fn symmetry_report(
    registry: &Registry,
    field: &str,
    kind: SymmetryKind,
    format: NumberFormat,
    only: Option<&[String]>,
) -> Result<SymmetryReport> {
    let sym = registry
        .symmetry(field, kind)
        .with_context(|| format!("building {kind} symmetry over {field}"))?;
    if let Some(unknown) = only
        .unwrap_or_default()
        .iter()
        .find(|name| sym.direction(name).is_none())
    {
        bail!("no orbit {unknown:?} in {kind} (have {})", sym.direction_names().join(","));
    }
    let mut orbits = Vec::new();
    for dir in sym.orbits() {
        if only.is_some_and(|names| !names.iter().any(|n| n == dir.name())) {
            continue;
        }
        let fold = match dir.rotated_prototype() {
            Some(r) => sym.permutation(r)?.element_order(),
            None => 1,
        };
        orbits.push(OrbitRow {
            name: dir.name().to_string(),
            prototype: dir.prototype().to_string_format(format),
            axes: sym.orbit_axes(dir.id())?.len(),
            fold,
            half_sizes: dir.half_sizes(),
            automatic: dir.is_automatic(),
            dot: sym.orbit_dot(dir.id()).map(|d| [d.x, d.y]),
        });
    }
    Ok(SymmetryReport {
        symmetry: sym.name().to_string(),
        field: field.to_string(),
        order: sym.chiral_order(),
        orbits,
    })
}

#[derive(Debug, Serialize)]
struct AxisReport {
    orbit: String,
    sense: String,
    orientation: usize,
    normal: String,
    rotation: Option<usize>,
}

fn find_axis(
    registry: &Registry,
    field_name: &str,
    kind: SymmetryKind,
    vector: Option<&str>,
    real: Option<&[f64]>,
) -> Result<Option<AxisReport>> {
    let field = lookup_field(registry, field_name)?;
    let sym = registry.symmetry(field_name, kind)?;
    let axis = match (vector, real) {
        (Some(text), None) => {
            let v = field.parse_vector(text, NumberFormat::Default)?;
            sym.get_axis(&v, None)?
        }
        (None, Some(&[x, y, z])) => sym.nearest_axis(&Vector3::new(x, y, z), None)?,
        (None, Some(r)) => bail!("--real takes three components, got {}", r.len()),
        _ => bail!("give either an exact vector or --real x,y,z"),
    };
    let Some(axis) = axis else {
        return Ok(None);
    };
    let orbit = sym.orbit(axis.orbit())?;
    Ok(Some(AxisReport {
        orbit: orbit.name().to_string(),
        sense: format!("{:?}", axis.sense()).to_lowercase(),
        orientation: axis.orientation(),
        normal: axis.normal().to_string(),
        rotation: sym.axis_rotation(&axis)?,
    }))
}

fn export(
    registry: &Registry,
    field: &str,
    kind: SymmetryKind,
    format: NumberFormat,
    only: Option<&[String]>,
    out: &Path,
) -> Result<PathBuf> {
    let report = symmetry_report(registry, field, kind, format, only)?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sym = registry.symmetry(field, kind)?;
    let names = report.orbits.iter().map(|o| o.name.clone()).collect();
    ExportRecord::new(&sym, format, names, only.is_some(), out).write()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    fn registry() -> Registry {
        Registry::with_defaults().unwrap()
    }

    #[test]
    fn flags_parse_globally() {
        let cmd = Cmd::try_parse_from([
            "zome",
            "axis",
            "--field",
            "rootTwo",
            "--symmetry",
            "octahedral",
            "--real=-1,0.5,2",
        ])
        .unwrap();
        assert_eq!(cmd.field, "rootTwo");
        assert_eq!(cmd.symmetry, SymmetryKind::Octahedral);
        let Action::Axis { vector, real } = cmd.action else {
            panic!("expected axis");
        };
        assert_eq!(vector, None);
        assert_eq!(real, Some(vec![-1.0, 0.5, 2.0]));
        assert!(Cmd::try_parse_from(["zome", "--symmetry", "tetrahedral", "fields"]).is_err());
    }

    #[test]
    fn fields_list_symbols_and_symmetries() {
        let lines = field_lines(&registry());
        let golden = lines.iter().find(|l| l.starts_with("golden")).unwrap();
        assert!(golden.contains("order=2"));
        assert!(golden.contains("symmetries=icosahedral,octahedral"));
        let root_two = lines.iter().find(|l| l.starts_with("rootTwo")).unwrap();
        assert!(root_two.ends_with("symmetries=octahedral"));
    }

    #[test]
    fn render_covers_every_format() {
        let reg = registry();
        let golden = reg.field("golden").unwrap();
        let rows = render(golden, "4 +3φ", Some(NumberFormat::Default), false).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2].1, "4 3");
        assert_eq!(rows[3].1, "(3,4)");
        let legacy = render(golden, "(3,4)", None, false).unwrap();
        assert_eq!(legacy[0].1, rows[0].1);
        assert!(render(golden, "4 +", None, false).is_err());
        let v = render(golden, "(1, 0, φ)", None, true).unwrap();
        assert_eq!(v[0].1, "(1, 0, φ)");
    }

    #[test]
    fn symmetry_report_counts_axes() {
        let report =
            symmetry_report(&registry(), "golden", SymmetryKind::Icosahedral, NumberFormat::Default, None).unwrap();
        assert_eq!(report.order, 60);
        let row = |name: &str| report.orbits.iter().find(|o| o.name == name).unwrap();
        assert_eq!((row("blue").axes, row("blue").fold), (30, 2));
        assert_eq!((row("red").axes, row("red").fold), (12, 5));
        assert_eq!((row("black").axes, row("black").fold), (120, 1));
        assert!(row("red").half_sizes);
        assert_eq!((row("green").axes, row("green").prototype.as_str()), (60, "(1, 1, 0)"));
        assert!(symmetry_report(&registry(), "rootTwo", SymmetryKind::Icosahedral, NumberFormat::Default, None).is_err());
    }

    #[test]
    fn axis_lookup_exact_and_nearest() {
        let reg = registry();
        let exact = find_axis(&reg, "golden", SymmetryKind::Icosahedral, Some("(0, 0, -2)"), None)
            .unwrap()
            .unwrap();
        assert_eq!(exact.orbit, "blue");
        assert_eq!(exact.normal, "(0, 0, -1)");
        assert!(exact.rotation.is_some());

        let near = find_axis(&reg, "rootTwo", SymmetryKind::Octahedral, None, Some(&[0.9, 1.0, 1.1]))
            .unwrap()
            .unwrap();
        assert_eq!(near.orbit, "yellow");

        let none = find_axis(&reg, "rootTwo", SymmetryKind::Octahedral, Some("(1, 2, 4)"), None).unwrap();
        assert!(none.is_none());
        assert!(find_axis(&reg, "golden", SymmetryKind::Icosahedral, None, Some(&[1.0, 0.0])).is_err());
        assert!(find_axis(&reg, "golden", SymmetryKind::Icosahedral, None, None).is_err());
    }

    #[test]
    fn export_writes_table_and_record() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("tables").join("octahedral.json");
        let record = export(&registry(), "rootTwo", SymmetryKind::Octahedral, NumberFormat::Default, None, &out).unwrap();
        assert_eq!(record, dir.path().join("tables").join("octahedral.export.json"));
        let table: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(table["order"], 24);
        assert_eq!(table["orbits"].as_array().unwrap().len(), 4);
        let rec: Value = serde_json::from_slice(&std::fs::read(&record).unwrap()).unwrap();
        assert_eq!(rec["field"]["name"], "rootTwo");
        assert_eq!(rec["symmetry"], "octahedral");
        assert_eq!(rec["format"], "default");
        assert_eq!(rec["orbits"], serde_json::json!(["blue", "green", "yellow", "black"]));
        assert_eq!(rec["subset"], false);
    }

    #[test]
    fn export_honours_format_and_orbit_subset() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("golden.json");
        let only = ["red".to_string(), "blue".to_string()];
        let record =
            export(&registry(), "golden", SymmetryKind::Icosahedral, NumberFormat::Zomic, Some(&only), &out).unwrap();
        let table: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        let rows = table["orbits"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "blue");
        assert_eq!(rows[1]["prototype"], "0 1 0 0 1 0");
        let rec: Value = serde_json::from_slice(&std::fs::read(&record).unwrap()).unwrap();
        assert_eq!(rec["orbits"], serde_json::json!(["blue", "red"]));
        assert_eq!(rec["format"], "zomic");
        assert_eq!(rec["subset"], true);

        let bad = ["teal".to_string()];
        let err = export(&registry(), "golden", SymmetryKind::Icosahedral, NumberFormat::Default, Some(&bad), &out)
            .unwrap_err();
        assert!(err.to_string().contains("teal"));
    }

    #[test]
    fn export_flags_parse() {
        let cmd = Cmd::try_parse_from(["zome", "export", "--out", "t.json", "--format", "vef", "--orbits=blue,red"]).unwrap();
        let Action::Export { format, orbits, .. } = cmd.action else {
            panic!("expected export");
        };
        assert_eq!(format, NumberFormat::Vef);
        assert_eq!(orbits, Some(vec!["blue".to_string(), "red".to_string()]));
    }
}
