//! Storage backend access.
//!
//! The OMX convention layers on top of a general-purpose hierarchical
//! container format; the actual chunked storage, compression, and group
//! indexing are the backend's problem, not ours. Everything the checks need
//! to read from a container file is expressed by [`MatrixContainer`], so the
//! engine never touches the backend crate directly.
//!
//! Two implementations exist: [`Hdf5Container`] adapts the real HDF5 backend
//! (behind the `hdf5` cargo feature), and [`MemoryContainer`] holds the same
//! structure in maps for tests and examples.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "hdf5")]
pub mod hdf5;
pub mod memory;

#[cfg(feature = "hdf5")]
pub use self::hdf5::Hdf5Container;
pub use memory::MemoryContainer;

/// Errors surfaced by a container backend while reading structure or
/// metadata. Inside a check these are reported, not propagated: the runner
/// converts them into failing outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("dataset '{name}' not found in group '{group}'")]
    DatasetNotFound { group: String, name: String },

    #[error("attribute '{name}' has unsupported type {found}")]
    AttributeType { name: String, found: String },

    #[error("backend error: {0}")]
    Backend(String),
}

/// One element of a numeric attribute, as stored by the backend.
///
/// The convention wants `SHAPE` entries to be integers, but writers have
/// been observed storing them as floats; [`AttrNum::as_exact_int`] is the
/// value-preserving cast the checks use to tell the two cases apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrNum {
    Int(i64),
    Float(f64),
}

impl AttrNum {
    /// Integer view of the value, `Some` only when the cast loses nothing.
    pub fn as_exact_int(&self) -> Option<i64> {
        match *self {
            AttrNum::Int(v) => Some(v),
            AttrNum::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 => {
                Some(v as i64)
            }
            AttrNum::Float(_) => None,
        }
    }
}

impl fmt::Display for AttrNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrNum::Int(v) => write!(f, "{}", v),
            AttrNum::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Coarse classification of a dataset's element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Int,
    Uint,
    Text,
    Bytes,
    Other,
}

impl ValueKind {
    /// Whether matrices of this kind satisfy the "common data types" rule.
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Float | ValueKind::Int | ValueKind::Uint)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Float => "float",
            ValueKind::Int => "int",
            ValueKind::Uint => "uint",
            ValueKind::Text => "text",
            ValueKind::Bytes => "bytes",
            ValueKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Compression descriptor reported by the backend for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compression {
    /// Filter library name, e.g. `zlib`.
    pub library: String,
    /// Compression level, when the library has one.
    pub level: Option<u8>,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Some(level) => write!(f, "{} level {}", self.library, level),
            None => write!(f, "{}", self.library),
        }
    }
}

/// Storage metadata of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    /// Extent per dimension.
    pub shape: Vec<u64>,
    /// Element type classification.
    pub kind: ValueKind,
    /// Chunk extent per dimension; `None` when the dataset is unchunked.
    pub chunks: Option<Vec<u64>>,
    /// Compression descriptor; `None` when the dataset is uncompressed.
    pub compression: Option<Compression>,
}

impl DatasetInfo {
    pub fn new(shape: &[u64], kind: ValueKind) -> Self {
        DatasetInfo {
            shape: shape.to_vec(),
            kind,
            chunks: None,
            compression: None,
        }
    }

    pub fn chunked(mut self, chunks: &[u64]) -> Self {
        self.chunks = Some(chunks.to_vec());
        self
    }

    pub fn compressed(mut self, library: &str, level: Option<u8>) -> Self {
        self.compression = Some(Compression {
            library: library.to_string(),
            level,
        });
        self
    }
}

/// One label value read from a lookup dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl LabelValue {
    /// Whether the label round-trips through an integer. Integral floats
    /// qualify; numeric text does not.
    pub fn is_int_like(&self) -> bool {
        match *self {
            LabelValue::Int(_) => true,
            LabelValue::Float(v) => v.is_finite() && v.fract() == 0.0,
            LabelValue::Text(_) | LabelValue::Bytes(_) => false,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, LabelValue::Text(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, LabelValue::Bytes(_))
    }
}

/// Read access to an opened container file.
///
/// This is exactly the capability surface the validator consumes from the
/// storage backend: attribute reads at the root, group and dataset listing,
/// per-dataset storage metadata, and label reads for lookups. Nothing here
/// mutates the file.
pub trait MatrixContainer {
    /// Byte content of a string or byte-string root attribute, `None` when
    /// the attribute is absent.
    fn root_attr_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, ContainerError>;

    /// Elements of a numeric root attribute, `None` when absent.
    fn root_attr_numbers(&self, name: &str) -> Result<Option<Vec<AttrNum>>, ContainerError>;

    /// Names of the groups directly under the root.
    fn root_groups(&self) -> Result<Vec<String>, ContainerError>;

    /// Names of the datasets directly under `group`.
    fn dataset_names(&self, group: &str) -> Result<Vec<String>, ContainerError>;

    /// Storage metadata of one dataset.
    fn dataset_info(&self, group: &str, name: &str) -> Result<DatasetInfo, ContainerError>;

    /// Whether the dataset carries an attribute called `attr`.
    fn has_dataset_attr(
        &self,
        group: &str,
        name: &str,
        attr: &str,
    ) -> Result<bool, ContainerError>;

    /// All label values of a lookup dataset, in index order.
    fn lookup_labels(&self, name: &str) -> Result<Vec<LabelValue>, ContainerError>;

    /// Whether a group of the given name exists directly under the root.
    fn has_root_group(&self, name: &str) -> Result<bool, ContainerError> {
        Ok(self.root_groups()?.iter().any(|g| g == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_int_accepts_integral_floats() {
        assert_eq!(AttrNum::Int(4).as_exact_int(), Some(4));
        assert_eq!(AttrNum::Float(4.0).as_exact_int(), Some(4));
        assert_eq!(AttrNum::Float(4.5).as_exact_int(), None);
        assert_eq!(AttrNum::Float(f64::NAN).as_exact_int(), None);
    }

    #[test]
    fn label_interpretations() {
        assert!(LabelValue::Int(7).is_int_like());
        assert!(LabelValue::Float(7.0).is_int_like());
        assert!(!LabelValue::Float(7.5).is_int_like());
        assert!(!LabelValue::Text("7".to_string()).is_int_like());
        assert!(LabelValue::Text("a".to_string()).is_text());
        assert!(LabelValue::Bytes(vec![0x61]).is_bytes());
    }
}
