//! Version and build information.
//!
//! Values are baked in by `build.rs`; git metadata is absent when building
//! outside a checkout.

use std::fmt;

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: Option<&'static str>,
    pub build_date: Option<&'static str>,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "omx-validate {}", self.version)?;
        if let Some(commit) = self.commit {
            write!(f, " ({})", commit)?;
        }
        Ok(())
    }
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("OMX_VALIDATE_GIT_HASH"),
        build_date: option_env!("OMX_VALIDATE_BUILD_DATE"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_crate_version() {
        let rendered = build_info().to_string();
        assert!(rendered.starts_with("omx-validate "));
        assert!(rendered.contains(env!("CARGO_PKG_VERSION")));
    }
}
