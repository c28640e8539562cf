//! Mandatory field merging.
//!
//! Each descriptor variant carries a static rule table. Three policies exist:
//! - `Overwrite`: the field is always set to the fixed value, discarding any
//!   prior content.
//! - `SetIfAbsent`: the field is set only when entirely absent; user-supplied
//!   values are left untouched.
//! - `UnionAppend`: the field is a list that must contain a fixed entry;
//!   the entry is appended at most once, preserving order and all
//!   pre-existing entries.
//!
//! Applying the rules to already-merged output is structurally a no-op, so
//! reconciliation can run any number of times.

use extmod_types::DescriptorKind;
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, TableLike, Value, value};

/// Feature entry that enables the extension-module build mode.
pub const SENTINEL_FEATURE: &str = "pyo3/extension-module";

/// Pinned build-system requirement for the package descriptor.
pub const MATURIN_REQUIRES: &str = "maturin>=1.7,<2.0";

/// Build backend for the package descriptor.
pub const MATURIN_BACKEND: &str = "maturin";

/// Name of the native binding dependency pinned into `[dependencies]`.
pub const PYO3_DEP: &str = "pyo3";

/// Pinned version of the native binding dependency.
pub const PYO3_VERSION: &str = "0.22.0";

enum MergeRule {
    Overwrite {
        section: &'static str,
        key: &'static str,
        value: fn() -> Item,
    },
    SetIfAbsent {
        section: &'static str,
        key: &'static str,
        value: fn() -> Item,
    },
    UnionAppend {
        section: &'static str,
        key: &'static str,
        entry: &'static str,
    },
}

const PYPROJECT_RULES: &[MergeRule] = &[
    MergeRule::UnionAppend {
        section: "project",
        key: "features",
        entry: SENTINEL_FEATURE,
    },
    MergeRule::SetIfAbsent {
        section: "build-system",
        key: "requires",
        value: maturin_requires,
    },
    MergeRule::SetIfAbsent {
        section: "build-system",
        key: "build-backend",
        value: maturin_backend,
    },
];

const CARGO_RULES: &[MergeRule] = &[
    MergeRule::Overwrite {
        section: "lib",
        key: "crate-type",
        value: cdylib_crate_type,
    },
    MergeRule::Overwrite {
        section: "dependencies",
        key: PYO3_DEP,
        value: pyo3_dependency,
    },
];

fn rules_for(kind: DescriptorKind) -> &'static [MergeRule] {
    match kind {
        DescriptorKind::Pyproject => PYPROJECT_RULES,
        DescriptorKind::CargoManifest => CARGO_RULES,
    }
}

/// Apply the variant's merge rules to the document in place.
///
/// Infallible: a missing section targeted by a rule is materialized as a
/// fresh table (for `build-system` this is exactly the whole-section
/// default), and a scalar sitting where a table belongs cannot hold the
/// mandated fields and is replaced.
pub fn merge(doc: &mut DocumentMut, kind: DescriptorKind) {
    for rule in rules_for(kind) {
        match rule {
            MergeRule::Overwrite { section, key, value } => {
                section_mut(doc, section).insert(key, value());
            }
            MergeRule::SetIfAbsent { section, key, value } => {
                let tbl = section_mut(doc, section);
                if tbl.get(key).is_none() {
                    tbl.insert(key, value());
                }
            }
            MergeRule::UnionAppend { section, key, entry } => {
                union_append(section_mut(doc, section), key, entry);
            }
        }
    }
}

fn section_mut<'a>(doc: &'a mut DocumentMut, name: &str) -> &'a mut dyn TableLike {
    let item = doc.entry(name).or_insert_with(|| Item::Table(Table::new()));
    if item.as_table_like_mut().is_none() {
        *item = Item::Table(Table::new());
    }
    match item.as_table_like_mut() {
        Some(tbl) => tbl,
        None => unreachable!("section was just replaced with a table"),
    }
}

fn union_append(tbl: &mut dyn TableLike, key: &str, entry: &str) {
    match tbl.get_mut(key).and_then(|item| item.as_array_mut()) {
        Some(list) => {
            if !list.iter().any(|v| v.as_str() == Some(entry)) {
                list.push(entry);
            }
        }
        // Absent, or not a list the entry can be unioned into.
        None => {
            let mut list = Array::new();
            list.push(entry);
            tbl.insert(key, value(list));
        }
    }
}

fn maturin_requires() -> Item {
    value(MATURIN_REQUIRES)
}

fn maturin_backend() -> Item {
    value(MATURIN_BACKEND)
}

fn cdylib_crate_type() -> Item {
    let mut arr = Array::new();
    arr.push("cdylib");
    value(arr)
}

fn pyo3_dependency() -> Item {
    let mut features = Array::new();
    features.push("extension-module");
    let mut spec = InlineTable::new();
    spec.insert("version", PYO3_VERSION.into());
    spec.insert("features", Value::Array(features));
    value(spec)
}
