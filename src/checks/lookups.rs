//! Checks over the `lookup` group and its label mappings (9 through 12).
//!
//! The lookup group is optional, so all four checks are informational.
//! Checks 10 and 11 report a plain failure (not an internal error) when the
//! group is absent.

use std::fmt;

use crate::container::{ContainerError, LabelValue, MatrixContainer};
use crate::convention::{LOOKUP_GROUP, SHAPE_ATTR};

use super::{pass_or_fail, Eval};

/// Check 9: a top-level group named `lookup` exists.
pub fn lookup_group(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    let present = file.has_root_group(LOOKUP_GROUP)?;
    eval.note(format!("group: {}", pass_or_fail(present)));
    eval.and(present);
    if present {
        let names = file.dataset_names(LOOKUP_GROUP)?;
        eval.note(format!("number of lookups: {}", names.len()));
        eval.note(format!("lookup names: [{}]", names.join(", ")));
    }
    Ok(eval)
}

/// Check 10: every lookup is one-dimensional and its extent matches either
/// the row or the column count declared in `SHAPE`.
pub fn shapes(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    if !file.has_root_group(LOOKUP_GROUP)? {
        eval.note("lookup group is missing");
        eval.and(false);
        return Ok(eval);
    }
    let Some(declared) = file.root_attr_numbers(SHAPE_ATTR)? else {
        eval.note("SHAPE attribute is missing");
        eval.and(false);
        return Ok(eval);
    };
    for name in file.dataset_names(LOOKUP_GROUP)? {
        let info = file.dataset_info(LOOKUP_GROUP, &name)?;
        let ok = info.shape.len() == 1
            && declared
                .iter()
                .any(|want| want.as_exact_int() == Some(info.shape[0] as i64));
        eval.note(format!(
            "lookup: {}: {:?}: {}",
            name,
            info.shape,
            pass_or_fail(ok)
        ));
        eval.and(ok);
    }
    Ok(eval)
}

/// How a lookup's labels were uniformly interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    Int,
    Text,
    Bytes,
}

impl fmt::Display for LabelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelClass::Int => "int",
            LabelClass::Text => "text",
            LabelClass::Bytes => "bytes",
        };
        write!(f, "{}", name)
    }
}

/// First interpretation under which every label round-trips, trying
/// integers, then text, then byte-strings. The priority order is part of
/// the convention: integral floats count as integers, numeric text does
/// not, and reordering would change reported classifications.
pub fn classify(labels: &[LabelValue]) -> Option<LabelClass> {
    if labels.iter().all(LabelValue::is_int_like) {
        return Some(LabelClass::Int);
    }
    if labels.iter().all(LabelValue::is_text) {
        return Some(LabelClass::Text);
    }
    if labels.iter().all(LabelValue::is_bytes) {
        return Some(LabelClass::Bytes);
    }
    None
}

/// Check 11: every lookup's labels are uniformly integers, text, or
/// byte-strings.
pub fn dtypes(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    if !file.has_root_group(LOOKUP_GROUP)? {
        eval.note("lookup group is missing");
        eval.and(false);
        return Ok(eval);
    }
    for name in file.dataset_names(LOOKUP_GROUP)? {
        let labels = file.lookup_labels(&name)?;
        let info = file.dataset_info(LOOKUP_GROUP, &name)?;
        match classify(&labels) {
            Some(class) => {
                eval.note(format!("lookup: {}: {}: read as {}: pass", name, info.kind, class));
                eval.and(true);
            }
            None => {
                eval.note(format!("lookup: {}: {}: mixed label types: fail", name, info.kind));
                eval.and(false);
            }
        }
    }
    Ok(eval)
}

/// Check 12: per-lookup `DIM` orientation attribute. Deliberately an
/// always-fail stub: the convention documents the attribute but no reader
/// supports it yet, and inventing a rule here would make conformance
/// results disagree between implementations.
pub fn dim_attribute(_file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    eval.note("DIM orientation attribute validation is not supported");
    eval.and(false);
    Ok(eval)
}
