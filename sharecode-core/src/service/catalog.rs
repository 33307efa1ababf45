//! Available services and candidate ranking

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::SettingsStore;
use crate::host::{label_keys, Labels};

use super::backend::Service;
use super::github::GithubService;
use super::gitlab::GitlabService;
use super::pastebin::PastebinService;

/// The closed set of supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// pastebin.com
    Pastebin,
    /// GitHub gists
    Github,
    /// GitLab snippets
    Gitlab,
}

impl ServiceKind {
    /// All kinds, in enumeration order
    pub const ALL: [Self; 3] = [Self::Pastebin, Self::Github, Self::Gitlab];

    /// Configuration scope and staging namespace of this kind
    #[must_use]
    pub const fn scope(self) -> &'static str {
        match self {
            Self::Pastebin => "pastebin",
            Self::Github => "github",
            Self::Gitlab => "gitlab",
        }
    }

    /// Whether an anonymous variant exists
    #[must_use]
    pub const fn supports_anonymous(self) -> bool {
        !matches!(self, Self::Gitlab)
    }

    /// Label key for the given mode
    #[must_use]
    pub const fn label_key(self, anonymous: bool) -> &'static str {
        match (self, anonymous) {
            (Self::Pastebin, false) => label_keys::PASTEBIN_SERVICE,
            (Self::Pastebin, true) => label_keys::PASTEBIN_SERVICE_ANONYMOUS,
            (Self::Github, false) => label_keys::GITHUB_SERVICE,
            (Self::Github, true) => label_keys::GITHUB_SERVICE_ANONYMOUS,
            (Self::Gitlab, _) => label_keys::GITLAB_SERVICE,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scope())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.scope().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown service '{s}' (expected pastebin, github or gitlab)"))
    }
}

/// A service paired with its display label
pub struct ServiceDescriptor {
    /// Display label
    pub label: String,
    /// Backend kind
    pub kind: ServiceKind,
    /// The service instance
    pub service: Box<dyn Service>,
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("anonymous", &self.service.is_anonymous())
            .finish_non_exhaustive()
    }
}

/// Source of service descriptors
///
/// Every call builds fresh service instances, and with them fresh
/// configuration caches.
pub trait ServiceCatalog: Send + Sync {
    /// Returns one descriptor per service variant, in enumeration order
    fn services(&self) -> Vec<ServiceDescriptor>;
}

/// The built-in backends over a shared settings store
pub struct BuiltinCatalog {
    store: Arc<dyn SettingsStore>,
    staging_root: PathBuf,
    labels: Arc<dyn Labels>,
}

impl BuiltinCatalog {
    /// Creates the catalog
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>, staging_root: PathBuf, labels: Arc<dyn Labels>) -> Self {
        Self {
            store,
            staging_root,
            labels,
        }
    }

    fn descriptor(&self, kind: ServiceKind, anonymous: bool) -> ServiceDescriptor {
        let store = Arc::clone(&self.store);
        let root = self.staging_root.as_path();
        let service: Box<dyn Service> = match kind {
            ServiceKind::Pastebin => Box::new(PastebinService::new(anonymous, store, root)),
            ServiceKind::Github => Box::new(GithubService::new(anonymous, store, root)),
            ServiceKind::Gitlab => Box::new(GitlabService::new(store, root)),
        };
        ServiceDescriptor {
            label: self.labels.t(kind.label_key(anonymous)),
            kind,
            service,
        }
    }
}

impl ServiceCatalog for BuiltinCatalog {
    fn services(&self) -> Vec<ServiceDescriptor> {
        let authenticated = ServiceKind::ALL.into_iter().map(|kind| (kind, false));
        let anonymous = ServiceKind::ALL
            .into_iter()
            .filter(|kind| kind.supports_anonymous())
            .map(|kind| (kind, true));

        authenticated
            .chain(anonymous)
            .map(|(kind, anonymous)| self.descriptor(kind, anonymous))
            .collect()
    }
}

/// Filters and orders descriptors for presentation
///
/// Anonymous services are dropped unless `with_anonymous` is set. Configured
/// services come first; otherwise the input order is kept.
#[must_use]
pub fn rank_candidates(mut services: Vec<ServiceDescriptor>, with_anonymous: bool) -> Vec<ServiceDescriptor> {
    if !with_anonymous {
        services.retain(|d| !d.service.is_anonymous());
    }
    services.sort_by_key(|d| d.service.is_not_configured());
    services
}
