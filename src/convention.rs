//! OMX convention constants.
//!
//! These values are fixed by the OMX file specification and have no runtime
//! mutation path. All node and attribute names used by the checks live here.

/// Expected value of the root version attribute.
pub const OMX_VERSION: &[u8] = b"0.2";

/// Root attribute holding the version literal.
pub const VERSION_ATTR: &str = "OMX_VERSION";

/// Root attribute declaring the common row/column extent of all matrices.
pub const SHAPE_ATTR: &str = "SHAPE";

/// Informational root attribute naming the tool that wrote the file.
pub const CREATED_WITH_ATTR: &str = "OMX_CREATED_WITH";

/// Top-level group holding the 2-D matrix datasets.
pub const DATA_GROUP: &str = "data";

/// Top-level group holding the 1-D index/label lookup datasets.
pub const LOOKUP_GROUP: &str = "lookup";

/// Per-matrix attribute naming the missing-data sentinel value.
pub const NA_ATTR: &str = "NA";

/// Per-lookup orientation attribute (0 = row, 1 = column).
pub const DIM_ATTR: &str = "DIM";

/// The only compression library guaranteed to be readable by every HDF5
/// implementation, and therefore the only one the convention allows.
pub const REQUIRED_COMPRESSION: &str = "zlib";

/// Number of checks in the validation suite.
pub const CHECK_COUNT: usize = 12;
