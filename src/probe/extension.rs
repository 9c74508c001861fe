//! Extension families and their compile-time availability.

use std::fmt;

use crate::error::{Error, Result};

/// One of the optional op families a build may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Scatter reductions (`ScatterOps`)
    Scatter,
    /// Nearest-neighbour search (`ClusterOps`)
    Cluster,
    /// B-spline convolution (`SplineOps`)
    SplineConv,
}

impl Extension {
    /// Every extension, in probe order
    pub const ALL: [Extension; 3] = [Extension::Scatter, Extension::Cluster, Extension::SplineConv];

    /// Stable name used in probe output
    pub fn name(&self) -> &'static str {
        match self {
            Extension::Scatter => "scatter",
            Extension::Cluster => "cluster",
            Extension::SplineConv => "spline_conv",
        }
    }

    /// Cargo feature that compiles the extension in
    pub fn feature(&self) -> &'static str {
        match self {
            Extension::Scatter => "scatter",
            Extension::Cluster => "cluster",
            Extension::SplineConv => "spline",
        }
    }

    /// True when the extension was compiled into this build
    pub fn is_available(&self) -> bool {
        match self {
            Extension::Scatter => cfg!(feature = "scatter"),
            Extension::Cluster => cfg!(feature = "cluster"),
            Extension::SplineConv => cfg!(feature = "spline"),
        }
    }

    /// Fails with `ExtensionUnavailable` when the extension is missing.
    pub fn require(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::ExtensionUnavailable {
                name: self.name(),
                feature: self.feature(),
            })
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
