//! HDF5 backend adapter.
//!
//! Translates the `hdf5` crate's vocabulary (type descriptors, filter
//! pipelines, fixed and variable-length strings) into the
//! [`MatrixContainer`] surface the checks consume. Files are opened
//! read-only and the handle is closed when the container is dropped, so a
//! validation run can never leave the file in a modified state.

use std::path::Path;

use hdf5::filters::Filter;
use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::File;
use log::debug;

use crate::convention::LOOKUP_GROUP;

use super::{
    AttrNum, Compression, ContainerError, DatasetInfo, LabelValue, MatrixContainer, ValueKind,
};

/// Longest fixed-width string attribute or label value we will read.
const MAX_FIXED_STR: usize = 256;

/// An opened HDF5 container file.
pub struct Hdf5Container {
    file: File,
}

impl Hdf5Container {
    /// Open an existing container file read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        debug!("opening container {}", path.display());
        let file = File::open(path).map_err(backend)?;
        Ok(Hdf5Container { file })
    }
}

fn backend(err: hdf5::Error) -> ContainerError {
    ContainerError::Backend(err.to_string())
}

/// Trailing component of a node path such as `/data/distance`.
fn leaf_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

fn kind_of(desc: &TypeDescriptor) -> ValueKind {
    match desc {
        TypeDescriptor::Integer(_) => ValueKind::Int,
        TypeDescriptor::Unsigned(_) => ValueKind::Uint,
        TypeDescriptor::Float(_) => ValueKind::Float,
        TypeDescriptor::FixedUnicode(_) | TypeDescriptor::VarLenUnicode => ValueKind::Text,
        TypeDescriptor::FixedAscii(_) | TypeDescriptor::VarLenAscii => ValueKind::Bytes,
        _ => ValueKind::Other,
    }
}

/// First recognized compression filter in the dataset's pipeline.
fn compression_of(ds: &hdf5::Dataset) -> Option<Compression> {
    for filter in ds.filters() {
        let found = match filter {
            Filter::Deflate(level) => Some(("zlib", Some(level))),
            Filter::SZip(..) => Some(("szip", None)),
            Filter::LZF => Some(("lzf", None)),
            Filter::Blosc(..) => Some(("blosc", None)),
            _ => None,
        };
        if let Some((library, level)) = found {
            return Some(Compression {
                library: library.to_string(),
                level,
            });
        }
    }
    None
}

impl Hdf5Container {
    fn group(&self, name: &str) -> Result<hdf5::Group, ContainerError> {
        self.file
            .group(name)
            .map_err(|_| ContainerError::GroupNotFound(name.to_string()))
    }

    fn dataset(&self, group: &str, name: &str) -> Result<hdf5::Dataset, ContainerError> {
        self.group(group)?
            .dataset(name)
            .map_err(|_| ContainerError::DatasetNotFound {
                group: group.to_string(),
                name: name.to_string(),
            })
    }
}

impl MatrixContainer for Hdf5Container {
    fn root_attr_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, ContainerError> {
        if !self.file.attr_names().map_err(backend)?.iter().any(|n| n == name) {
            return Ok(None);
        }
        let attr = self.file.attr(name).map_err(backend)?;
        let desc = attr.dtype().map_err(backend)?.to_descriptor().map_err(backend)?;
        let text = match desc {
            TypeDescriptor::FixedAscii(n) if n <= MAX_FIXED_STR => attr
                .read_scalar::<FixedAscii<MAX_FIXED_STR>>()
                .map_err(backend)?
                .as_str()
                .to_string(),
            TypeDescriptor::FixedUnicode(n) if n <= MAX_FIXED_STR => attr
                .read_scalar::<FixedUnicode<MAX_FIXED_STR>>()
                .map_err(backend)?
                .as_str()
                .to_string(),
            TypeDescriptor::VarLenAscii => attr
                .read_scalar::<VarLenAscii>()
                .map_err(backend)?
                .as_str()
                .to_string(),
            TypeDescriptor::VarLenUnicode => attr
                .read_scalar::<VarLenUnicode>()
                .map_err(backend)?
                .as_str()
                .to_string(),
            other => {
                return Err(ContainerError::AttributeType {
                    name: name.to_string(),
                    found: format!("{:?}", other),
                })
            }
        };
        Ok(Some(text.into_bytes()))
    }

    fn root_attr_numbers(&self, name: &str) -> Result<Option<Vec<AttrNum>>, ContainerError> {
        if !self.file.attr_names().map_err(backend)?.iter().any(|n| n == name) {
            return Ok(None);
        }
        let attr = self.file.attr(name).map_err(backend)?;
        let desc = attr.dtype().map_err(backend)?.to_descriptor().map_err(backend)?;
        let values = match desc {
            TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => attr
                .read_raw::<i64>()
                .map_err(backend)?
                .into_iter()
                .map(AttrNum::Int)
                .collect(),
            TypeDescriptor::Float(_) => attr
                .read_raw::<f64>()
                .map_err(backend)?
                .into_iter()
                .map(AttrNum::Float)
                .collect(),
            other => {
                return Err(ContainerError::AttributeType {
                    name: name.to_string(),
                    found: format!("{:?}", other),
                })
            }
        };
        Ok(Some(values))
    }

    fn root_groups(&self) -> Result<Vec<String>, ContainerError> {
        let groups = self.file.groups().map_err(backend)?;
        Ok(groups.iter().map(|g| leaf_name(&g.name())).collect())
    }

    fn dataset_names(&self, group: &str) -> Result<Vec<String>, ContainerError> {
        let datasets = self.group(group)?.datasets().map_err(backend)?;
        Ok(datasets.iter().map(|d| leaf_name(&d.name())).collect())
    }

    fn dataset_info(&self, group: &str, name: &str) -> Result<DatasetInfo, ContainerError> {
        let ds = self.dataset(group, name)?;
        let desc = ds.dtype().map_err(backend)?.to_descriptor().map_err(backend)?;
        Ok(DatasetInfo {
            shape: ds.shape().iter().map(|&v| v as u64).collect(),
            kind: kind_of(&desc),
            chunks: ds
                .chunk()
                .map(|chunk| chunk.iter().map(|&v| v as u64).collect()),
            compression: compression_of(&ds),
        })
    }

    fn has_dataset_attr(
        &self,
        group: &str,
        name: &str,
        attr: &str,
    ) -> Result<bool, ContainerError> {
        let ds = self.dataset(group, name)?;
        Ok(ds.attr_names().map_err(backend)?.iter().any(|n| n == attr))
    }

    fn lookup_labels(&self, name: &str) -> Result<Vec<LabelValue>, ContainerError> {
        let ds = self.dataset(LOOKUP_GROUP, name)?;
        let desc = ds.dtype().map_err(backend)?.to_descriptor().map_err(backend)?;
        let labels = match desc {
            TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => ds
                .read_raw::<i64>()
                .map_err(backend)?
                .into_iter()
                .map(LabelValue::Int)
                .collect(),
            TypeDescriptor::Float(_) => ds
                .read_raw::<f64>()
                .map_err(backend)?
                .into_iter()
                .map(LabelValue::Float)
                .collect(),
            TypeDescriptor::FixedAscii(n) if n <= MAX_FIXED_STR => ds
                .read_raw::<FixedAscii<MAX_FIXED_STR>>()
                .map_err(backend)?
                .into_iter()
                .map(|v| LabelValue::Bytes(v.as_str().as_bytes().to_vec()))
                .collect(),
            TypeDescriptor::VarLenAscii => ds
                .read_raw::<VarLenAscii>()
                .map_err(backend)?
                .into_iter()
                .map(|v| LabelValue::Bytes(v.as_str().as_bytes().to_vec()))
                .collect(),
            TypeDescriptor::FixedUnicode(n) if n <= MAX_FIXED_STR => ds
                .read_raw::<FixedUnicode<MAX_FIXED_STR>>()
                .map_err(backend)?
                .into_iter()
                .map(|v| LabelValue::Text(v.as_str().to_string()))
                .collect(),
            TypeDescriptor::VarLenUnicode => ds
                .read_raw::<VarLenUnicode>()
                .map_err(backend)?
                .into_iter()
                .map(|v| LabelValue::Text(v.as_str().to_string()))
                .collect(),
            other => {
                return Err(ContainerError::Backend(format!(
                    "lookup '{}' has unsupported element type {:?}",
                    name, other
                )))
            }
        };
        Ok(labels)
    }
}
