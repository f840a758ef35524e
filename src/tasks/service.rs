use std::fmt;

/// The services a builder can provision.
///
/// Each kind owns the literal record its builder writes and the title shown
/// once the record is reported.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// Secrets vault
    Vault,
    /// Source-control platform (GitLab)
    SourceControl,
    /// Deployment platform (ArgoCD)
    Deployment,
}

impl ServiceKind {
    /// Every kind, in launch order.
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Vault,
        ServiceKind::SourceControl,
        ServiceKind::Deployment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Vault => "Vault",
            ServiceKind::SourceControl => "GitLab",
            ServiceKind::Deployment => "ArgoCD",
        }
    }

    pub fn title(&self) -> String {
        format!("{} is Ready!", self.name())
    }

    /// Builds the fixed record for this kind.
    pub fn produce(&self) -> ServiceResult {
        match self {
            ServiceKind::Vault => ServiceResult::Vault(VaultConfig {
                url: "https://vault.example.com/".to_string(),
                method: "token".to_string(),
                token: "jwt-token-here".to_string(),
            }),
            ServiceKind::SourceControl => ServiceResult::SourceControl(GitLabConfig {
                url: "https://gitlab.example.com".to_string(),
                username: "test".to_string(),
                password: "test".to_string(),
                sso_enabled: true,
            }),
            ServiceKind::Deployment => ServiceResult::Deployment(ArgoCdConfig {
                url: "https://argocd.example.com".to_string(),
                username: "test-argocd".to_string(),
                password: "test-argocd".to_string(),
                sso_enabled: true,
            }),
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub url: String,
    /// Authentication method
    pub method: String,
    pub token: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLabConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub sso_enabled: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgoCdConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub sso_enabled: bool,
}

/// Connection details produced by one builder.
///
/// `Display` renders the title line followed by one `label: value` line per
/// field, without separators.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResult {
    Vault(VaultConfig),
    SourceControl(GitLabConfig),
    Deployment(ArgoCdConfig),
}

impl ServiceResult {
    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceResult::Vault(_) => ServiceKind::Vault,
            ServiceResult::SourceControl(_) => ServiceKind::SourceControl,
            ServiceResult::Deployment(_) => ServiceKind::Deployment,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ServiceResult::Vault(config) => &config.url,
            ServiceResult::SourceControl(config) => &config.url,
            ServiceResult::Deployment(config) => &config.url,
        }
    }

    /// Labelled fields in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ServiceResult::Vault(config) => vec![
                ("URL", config.url.clone()),
                ("method", config.method.clone()),
                ("token", config.token.clone()),
            ],
            ServiceResult::SourceControl(GitLabConfig {
                url,
                username,
                password,
                sso_enabled,
            })
            | ServiceResult::Deployment(ArgoCdConfig {
                url,
                username,
                password,
                sso_enabled,
            }) => vec![
                ("URL", url.clone()),
                ("username", username.clone()),
                ("password", password.clone()),
                ("sso enabled", sso_enabled.to_string()),
            ],
        }
    }

    /// True when every string field holds a value.
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|(_, value)| !value.is_empty())
    }
}

impl fmt::Display for ServiceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind().title())?;
        for (label, value) in self.fields() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}
