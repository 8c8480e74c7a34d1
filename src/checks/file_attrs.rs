//! File-level attribute checks (1 and 2).

use crate::container::{ContainerError, MatrixContainer};
use crate::convention::{OMX_VERSION, SHAPE_ATTR, VERSION_ATTR};

use super::{pass_or_fail, Eval};

/// Check 1: the root `OMX_VERSION` attribute equals `0.2`.
pub fn version(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    match file.root_attr_bytes(VERSION_ATTR)? {
        Some(value) => {
            let ok = value == OMX_VERSION;
            eval.note(format!(
                "file version is {}: {}",
                String::from_utf8_lossy(&value),
                pass_or_fail(ok)
            ));
            eval.and(ok);
        }
        None => {
            eval.note("OMX_VERSION attribute is missing");
            eval.and(false);
        }
    }
    Ok(eval)
}

/// Check 2: the root `SHAPE` attribute has exactly two entries, both
/// representable as integers without loss.
pub fn shape(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    let Some(values) = file.root_attr_numbers(SHAPE_ATTR)? else {
        eval.note("SHAPE attribute is missing");
        eval.and(false);
        return Ok(eval);
    };

    let length_ok = values.len() == 2;
    eval.note(format!("length is 2: {}", pass_or_fail(length_ok)));
    eval.and(length_ok);

    for (index, value) in values.iter().enumerate() {
        let integral = value.as_exact_int().is_some();
        eval.note(format!(
            "item {} ({}) is integer: {}",
            index,
            value,
            pass_or_fail(integral)
        ));
        eval.and(integral);
    }

    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    eval.note(format!("shape: ({})", rendered.join(", ")));
    Ok(eval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{AttrNum, MemoryContainer};

    #[test]
    fn version_matches_literal() {
        let file = MemoryContainer::new().with_version(b"0.2");
        assert!(version(&file).unwrap().passed);

        let file = MemoryContainer::new().with_version(b"0.3");
        assert!(!version(&file).unwrap().passed);
    }

    #[test]
    fn version_missing_fails_without_error() {
        let file = MemoryContainer::new();
        let eval = version(&file).unwrap();
        assert!(!eval.passed);
    }

    #[test]
    fn shape_requires_two_integral_entries() {
        let file = MemoryContainer::new().with_shape(&[4, 4]);
        assert!(shape(&file).unwrap().passed);

        let file = MemoryContainer::new()
            .with_root_numbers(SHAPE_ATTR, &[AttrNum::Float(4.0), AttrNum::Float(6.0)]);
        assert!(shape(&file).unwrap().passed);

        let file = MemoryContainer::new()
            .with_root_numbers(SHAPE_ATTR, &[AttrNum::Float(4.5), AttrNum::Int(6)]);
        assert!(!shape(&file).unwrap().passed);

        let file = MemoryContainer::new().with_root_numbers(SHAPE_ATTR, &[AttrNum::Int(4)]);
        assert!(!shape(&file).unwrap().passed);
    }
}
