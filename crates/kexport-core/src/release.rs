//! Release channel and version stamping

use crate::error::KexportError;
use chrono::{DateTime, Utc};
use std::fmt::{self, Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Which kind of artifact is being built
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReleaseChannel {
    /// Regular release
    #[default]
    Stable,

    /// Nightly build, published under `<package>-nightly`
    Nightly,

    /// Release candidate with a suffix such as `rc1`
    ReleaseCandidate(String),
}

impl ReleaseChannel {
    /// Channel from the CLI flags; nightly wins over a release candidate
    #[must_use]
    pub fn from_flags(nightly: bool, rc: Option<String>) -> Self {
        match (nightly, rc) {
            (true, _) => Self::Nightly,
            (false, Some(rc)) if !rc.is_empty() => Self::ReleaseCandidate(rc),
            _ => Self::Stable,
        }
    }

    /// Version string for `base` built at `now`
    ///
    /// Nightly appends `.devYYYYMMDDHH`; a release candidate appends its suffix.
    #[must_use]
    pub fn version(&self, base: &str, now: DateTime<Utc>) -> String {
        match self {
            Self::Stable => base.to_string(),
            Self::Nightly => format!("{base}.dev{}", now.format("%Y%m%d%H")),
            Self::ReleaseCandidate(rc) => format!("{base}{rc}"),
        }
    }

    /// Distribution name for `package`
    #[must_use]
    pub fn distribution_name(&self, package: &str) -> String {
        match self {
            Self::Nightly => format!("{package}-nightly"),
            _ => package.to_string(),
        }
    }
}

impl Display for ReleaseChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => f.write_str("stable"),
            Self::Nightly => f.write_str("nightly"),
            Self::ReleaseCandidate(rc) => write!(f, "release candidate {rc}"),
        }
    }
}

/// Append `__version__ = "<version>"` to the package init file
///
/// # Errors
/// `Io` if the file cannot be opened or written
pub fn stamp_version(package_dir: &Path, version: &str) -> Result<(), KexportError> {
    let init = package_dir.join(kexport_tree::INIT_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&init)
        .map_err(|e| KexportError::io(&init, e))?;
    write!(file, "\n\n__version__ = \"{version}\"\n").map_err(|e| KexportError::io(&init, e))?;
    tracing::info!("stamped version {version} into {}", init.display());
    Ok(())
}
