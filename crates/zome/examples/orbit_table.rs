//! Orbit table for the icosahedral symmetry over the golden field.
//!
//! Prints one line per orbit: prototype, axis count, rotation order about
//! the prototype axis, and its dot inside the blue/red/yellow triangle.
//! Handy as a sanity check after touching the generators or the chamber.

use std::time::Instant;

use zome::prelude::*;

fn main() {
    let field = Field::new(GoldenField);
    let start = Instant::now();
    let sym = Symmetry::icosahedral(&field).expect("golden field supports icosahedral symmetry");
    let build_ms = start.elapsed().as_secs_f64() * 1e3;

    println!("symmetry={} field={} order={}", sym.name(), field, sym.chiral_order());
    println!("build_time_ms={build_ms:.3}");
    for dir in sym.orbits() {
        let axes = sym.orbit_axes(dir.id()).expect("orbit exists");
        let fold = dir
            .rotated_prototype()
            .and_then(|r| sym.permutation(r).ok())
            .map_or(1, Permutation::element_order);
        let dot = sym
            .orbit_dot(dir.id())
            .map(|d| format!("({:.4}, {:.4})", d.x, d.y))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} prototype={} axes={} fold={} dot={}",
            dir.name(),
            dir.prototype(),
            axes.len(),
            fold,
            dot
        );
    }
}
