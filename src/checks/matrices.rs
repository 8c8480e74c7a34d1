//! Checks over the `data` group and its matrices (3 through 8).
//!
//! Checks 4 through 8 iterate over every matrix and AND the per-matrix
//! results; a file with an empty `data` group passes them vacuously. When
//! the `data` group itself is missing, listing its members surfaces a
//! [`ContainerError`] which the runner reports as an internal-error outcome,
//! matching the convention's catch-and-convert policy.

use crate::container::{ContainerError, MatrixContainer};
use crate::convention::{DATA_GROUP, NA_ATTR, REQUIRED_COMPRESSION, SHAPE_ATTR};

use super::{dims_match, pass_or_fail, Eval};

/// Check 3: a top-level group named `data` exists.
pub fn data_group(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    let present = file.has_root_group(DATA_GROUP)?;
    eval.note(format!("group: {}", pass_or_fail(present)));
    eval.and(present);
    if present {
        let names = file.dataset_names(DATA_GROUP)?;
        eval.note(format!("number of matrices: {}", names.len()));
        eval.note(format!("matrix names: [{}]", names.join(", ")));
    }
    Ok(eval)
}

/// Check 4: every matrix shape equals the file `SHAPE` element-wise.
pub fn shapes(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    let Some(declared) = file.root_attr_numbers(SHAPE_ATTR)? else {
        eval.note("SHAPE attribute is missing");
        eval.and(false);
        return Ok(eval);
    };
    for name in file.dataset_names(DATA_GROUP)? {
        let info = file.dataset_info(DATA_GROUP, &name)?;
        let ok = dims_match(&info.shape, &declared);
        eval.note(format!(
            "matrix shape: {}: {:?}: {}",
            name,
            info.shape,
            pass_or_fail(ok)
        ));
        eval.and(ok);
    }
    Ok(eval)
}

/// Check 5: every matrix dtype is floating-point or integer.
pub fn dtypes(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    for name in file.dataset_names(DATA_GROUP)? {
        let info = file.dataset_info(DATA_GROUP, &name)?;
        let ok = info.kind.is_numeric();
        eval.note(format!(
            "matrix: {}: {}: {}",
            name,
            info.kind,
            pass_or_fail(ok)
        ));
        eval.and(ok);
    }
    Ok(eval)
}

/// Check 6: every matrix reports a chunk shape.
pub fn chunking(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    for name in file.dataset_names(DATA_GROUP)? {
        let info = file.dataset_info(DATA_GROUP, &name)?;
        let ok = info.chunks.is_some();
        match info.chunks {
            Some(chunks) => eval.note(format!(
                "matrix chunkshape: {}: {:?}: {}",
                name,
                chunks,
                pass_or_fail(ok)
            )),
            None => eval.note(format!("matrix chunkshape: {}: none: fail", name)),
        }
        eval.and(ok);
    }
    Ok(eval)
}

/// Check 7: every compressed matrix uses zlib. Uncompressed matrices pass;
/// the level is reported but not constrained.
pub fn compression(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    for name in file.dataset_names(DATA_GROUP)? {
        let info = file.dataset_info(DATA_GROUP, &name)?;
        if let Some(comp) = info.compression {
            let ok = comp.library == REQUIRED_COMPRESSION;
            eval.note(format!(
                "matrix compression library and level: {}: {}: {}",
                name,
                comp,
                pass_or_fail(ok)
            ));
            eval.and(ok);
        }
    }
    Ok(eval)
}

/// Check 8: every matrix carries an `NA` attribute. Presence only; the
/// sentinel value itself is not inspected.
pub fn na_attribute(file: &dyn MatrixContainer) -> Result<Eval, ContainerError> {
    let mut eval = Eval::new();
    for name in file.dataset_names(DATA_GROUP)? {
        let ok = file.has_dataset_attr(DATA_GROUP, &name, NA_ATTR)?;
        eval.note(format!("matrix NA attribute: {}: {}", name, pass_or_fail(ok)));
        eval.and(ok);
    }
    Ok(eval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{DatasetInfo, MemoryContainer, ValueKind};

    fn base() -> MemoryContainer {
        MemoryContainer::new().with_version(b"0.2").with_shape(&[4, 4])
    }

    #[test]
    fn data_group_presence() {
        let file = base().with_group(DATA_GROUP);
        assert!(data_group(&file).unwrap().passed);

        let file = base();
        assert!(!data_group(&file).unwrap().passed);
    }

    #[test]
    fn shape_mismatch_fails() {
        let file = base()
            .with_matrix("good", DatasetInfo::new(&[4, 4], ValueKind::Float))
            .with_matrix("bad", DatasetInfo::new(&[4, 5], ValueKind::Float));
        let eval = shapes(&file).unwrap();
        assert!(!eval.passed);
        assert_eq!(eval.details.len(), 2);
    }

    #[test]
    fn empty_data_group_passes_vacuously() {
        let file = base().with_group(DATA_GROUP);
        assert!(shapes(&file).unwrap().passed);
        assert!(dtypes(&file).unwrap().passed);
        assert!(chunking(&file).unwrap().passed);
        assert!(compression(&file).unwrap().passed);
        assert!(na_attribute(&file).unwrap().passed);
    }

    #[test]
    fn missing_data_group_is_a_backend_error() {
        let file = base();
        assert!(shapes(&file).is_err());
    }

    #[test]
    fn text_matrix_fails_dtype_check() {
        let file = base().with_matrix("labels", DatasetInfo::new(&[4, 4], ValueKind::Text));
        assert!(!dtypes(&file).unwrap().passed);
    }

    #[test]
    fn non_zlib_compression_fails_only_when_compressed() {
        let uncompressed = base().with_matrix(
            "plain",
            DatasetInfo::new(&[4, 4], ValueKind::Float).chunked(&[2, 2]),
        );
        assert!(compression(&uncompressed).unwrap().passed);

        let blosc = base().with_matrix(
            "fancy",
            DatasetInfo::new(&[4, 4], ValueKind::Float)
                .chunked(&[2, 2])
                .compressed("blosc", None),
        );
        assert!(!compression(&blosc).unwrap().passed);
    }
}
