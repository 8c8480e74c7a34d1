//! In-memory container.
//!
//! Holds the same structure a real container file would (root attributes,
//! groups, dataset metadata, lookup labels) in plain maps. Used by the test
//! suite and doc examples so the engine can be exercised without an HDF5
//! backend or fixture files on disk.

use std::collections::BTreeMap;

use crate::convention::{DATA_GROUP, LOOKUP_GROUP, SHAPE_ATTR, VERSION_ATTR};

use super::{
    AttrNum, ContainerError, DatasetInfo, LabelValue, MatrixContainer, ValueKind,
};

#[derive(Debug, Clone)]
enum RootAttr {
    Bytes(Vec<u8>),
    Numbers(Vec<AttrNum>),
}

#[derive(Debug, Clone)]
struct MemoryDataset {
    info: DatasetInfo,
    attrs: Vec<String>,
    labels: Vec<LabelValue>,
}

/// An in-memory [`MatrixContainer`] assembled with builder calls.
///
/// ```
/// use omx_validate::container::{DatasetInfo, MemoryContainer, ValueKind};
///
/// let file = MemoryContainer::new()
///     .with_version(b"0.2")
///     .with_shape(&[4, 4])
///     .with_matrix(
///         "distance",
///         DatasetInfo::new(&[4, 4], ValueKind::Float).chunked(&[2, 2]),
///     );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    root_attrs: BTreeMap<String, RootAttr>,
    groups: BTreeMap<String, BTreeMap<String, MemoryDataset>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root `OMX_VERSION` attribute.
    pub fn with_version(self, version: &[u8]) -> Self {
        self.with_root_bytes(VERSION_ATTR, version)
    }

    /// Set the root `SHAPE` attribute from integer extents.
    pub fn with_shape(self, dims: &[i64]) -> Self {
        let numbers: Vec<AttrNum> = dims.iter().copied().map(AttrNum::Int).collect();
        self.with_root_numbers(SHAPE_ATTR, &numbers)
    }

    pub fn with_root_bytes(mut self, name: &str, value: &[u8]) -> Self {
        self.root_attrs
            .insert(name.to_string(), RootAttr::Bytes(value.to_vec()));
        self
    }

    pub fn with_root_numbers(mut self, name: &str, values: &[AttrNum]) -> Self {
        self.root_attrs
            .insert(name.to_string(), RootAttr::Numbers(values.to_vec()));
        self
    }

    /// Add an empty top-level group.
    pub fn with_group(mut self, name: &str) -> Self {
        self.groups.entry(name.to_string()).or_default();
        self
    }

    /// Add a dataset with explicit metadata and label values.
    pub fn with_dataset(
        mut self,
        group: &str,
        name: &str,
        info: DatasetInfo,
        labels: Vec<LabelValue>,
    ) -> Self {
        self.groups.entry(group.to_string()).or_default().insert(
            name.to_string(),
            MemoryDataset {
                info,
                attrs: Vec::new(),
                labels,
            },
        );
        self
    }

    /// Add a matrix to the `data` group.
    pub fn with_matrix(self, name: &str, info: DatasetInfo) -> Self {
        self.with_dataset(DATA_GROUP, name, info, Vec::new())
    }

    /// Attach an attribute name to an existing dataset.
    pub fn with_dataset_attr(mut self, group: &str, name: &str, attr: &str) -> Self {
        if let Some(ds) = self
            .groups
            .get_mut(group)
            .and_then(|members| members.get_mut(name))
        {
            ds.attrs.push(attr.to_string());
        }
        self
    }

    /// Add a lookup to the `lookup` group, deriving shape and kind from the
    /// labels.
    pub fn with_lookup(self, name: &str, labels: Vec<LabelValue>) -> Self {
        let kind = labels.first().map_or(ValueKind::Other, |label| match label {
            LabelValue::Int(_) => ValueKind::Int,
            LabelValue::Float(_) => ValueKind::Float,
            LabelValue::Text(_) => ValueKind::Text,
            LabelValue::Bytes(_) => ValueKind::Bytes,
        });
        let info = DatasetInfo::new(&[labels.len() as u64], kind);
        self.with_dataset(LOOKUP_GROUP, name, info, labels)
    }

    fn group(
        &self,
        name: &str,
    ) -> Result<&BTreeMap<String, MemoryDataset>, ContainerError> {
        self.groups
            .get(name)
            .ok_or_else(|| ContainerError::GroupNotFound(name.to_string()))
    }

    fn dataset(&self, group: &str, name: &str) -> Result<&MemoryDataset, ContainerError> {
        self.group(group)?
            .get(name)
            .ok_or_else(|| ContainerError::DatasetNotFound {
                group: group.to_string(),
                name: name.to_string(),
            })
    }
}

impl MatrixContainer for MemoryContainer {
    fn root_attr_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, ContainerError> {
        match self.root_attrs.get(name) {
            Some(RootAttr::Bytes(value)) => Ok(Some(value.clone())),
            Some(RootAttr::Numbers(_)) => Err(ContainerError::AttributeType {
                name: name.to_string(),
                found: "numeric".to_string(),
            }),
            None => Ok(None),
        }
    }

    fn root_attr_numbers(&self, name: &str) -> Result<Option<Vec<AttrNum>>, ContainerError> {
        match self.root_attrs.get(name) {
            Some(RootAttr::Numbers(values)) => Ok(Some(values.clone())),
            Some(RootAttr::Bytes(_)) => Err(ContainerError::AttributeType {
                name: name.to_string(),
                found: "bytes".to_string(),
            }),
            None => Ok(None),
        }
    }

    fn root_groups(&self) -> Result<Vec<String>, ContainerError> {
        Ok(self.groups.keys().cloned().collect())
    }

    fn dataset_names(&self, group: &str) -> Result<Vec<String>, ContainerError> {
        Ok(self.group(group)?.keys().cloned().collect())
    }

    fn dataset_info(&self, group: &str, name: &str) -> Result<DatasetInfo, ContainerError> {
        Ok(self.dataset(group, name)?.info.clone())
    }

    fn has_dataset_attr(
        &self,
        group: &str,
        name: &str,
        attr: &str,
    ) -> Result<bool, ContainerError> {
        Ok(self.dataset(group, name)?.attrs.iter().any(|a| a == attr))
    }

    fn lookup_labels(&self, name: &str) -> Result<Vec<LabelValue>, ContainerError> {
        Ok(self.dataset(LOOKUP_GROUP, name)?.labels.clone())
    }
}
