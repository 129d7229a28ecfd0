//! Configuration management for docview.
//!
//! Parses `docview.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base_prefix`
//! - `server.host`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the static bundle directory.
    pub bundle_dir: Option<PathBuf>,
    /// Override the routing mode.
    pub routing: Option<RoutingSetting>,
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docview.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout: content locations, version and footer.
    pub site: SiteConfig,
    /// Supported languages.
    pub languages: LanguagesConfig,
    /// URL routing.
    pub routing: RoutingConfig,
    /// Slug validation rules.
    pub security: SecurityConfig,
    /// Search box behaviour.
    pub search: SearchConfig,
    /// Persisted preferences (paths are relative strings from TOML).
    preferences: PreferencesConfigRaw,
    /// Preview server configuration.
    pub server: ServerConfig,

    /// Resolved filesystem paths (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site layout configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Static bundle directory as written in TOML.
    bundle_dir: Option<String>,
    /// URL prefix the bundle is hosted under in path routing (e.g. `docs-platform`).
    pub base_prefix: String,
    /// Documentation version directory.
    pub doc_version: String,
    /// Directory holding versioned markdown content, relative to the bundle.
    pub content_root: String,
    /// Sidebar manifest, relative to the bundle.
    pub manifest: String,
    /// Search index, relative to the bundle.
    pub search_index: String,
    /// Directory holding per-language landing content, relative to the bundle.
    pub landing_dir: String,
    /// Footer appended to every rendered document.
    pub footer: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bundle_dir: None,
            base_prefix: "docs-platform".to_owned(),
            doc_version: "v1.0".to_owned(),
            content_root: "content".to_owned(),
            manifest: "manifest.json".to_owned(),
            search_index: "search_index.json".to_owned(),
            landing_dir: "content/landing".to_owned(),
            footer: "© 2025 RBWare Co., Ltd. All rights reserved.".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Base prefix without surrounding slashes.
    #[must_use]
    pub fn normalized_prefix(&self) -> &str {
        self.base_prefix.trim_matches('/')
    }

    /// Base that asset references are rewritten against.
    ///
    /// Path routing serves the bundle under `/{prefix}/`, hash routing from `./`.
    #[must_use]
    pub fn asset_base(&self, mode: RoutingMode) -> String {
        match mode {
            RoutingMode::Hash => "./".to_owned(),
            RoutingMode::Path => {
                let prefix = self.normalized_prefix();
                if prefix.is_empty() {
                    "/".to_owned()
                } else {
                    format!("/{prefix}/")
                }
            }
        }
    }
}

/// Supported languages.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// Language codes the site ships content for.
    pub supported: Vec<String>,
    /// Language used when nothing else applies.
    pub default: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            supported: vec!["ko".to_owned(), "en".to_owned()],
            default: "ko".to_owned(),
        }
    }
}

/// Routing mode as written in configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoutingSetting {
    /// Pick from the hosting environment at startup.
    #[default]
    Auto,
    /// Always use `#/slug` fragments.
    Hash,
    /// Always use `/{prefix}/{lang}/{slug}` paths.
    Path,
}

impl std::str::FromStr for RoutingSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "hash" => Ok(Self::Hash),
            "path" => Ok(Self::Path),
            other => Err(ConfigError::Validation(format!(
                "routing.mode must be auto, hash or path (got {other:?})"
            ))),
        }
    }
}

/// Routing mode resolved once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutingMode {
    /// Fragment routing (`#/setup/install`).
    Hash,
    /// Path routing (`/docs-platform/ko/setup/install`).
    Path,
}

impl std::fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash => f.write_str("hash"),
            Self::Path => f.write_str("path"),
        }
    }
}

/// Routing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Requested routing mode.
    pub mode: RoutingSetting,
    /// Hostname fragment that marks the production host in `auto` mode.
    pub production_host: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            mode: RoutingSetting::Auto,
            production_host: "github.io".to_owned(),
        }
    }
}

impl RoutingConfig {
    /// Resolve the routing mode for the given hostname.
    #[must_use]
    pub fn resolve(&self, hostname: &str) -> RoutingMode {
        match self.mode {
            RoutingSetting::Hash => RoutingMode::Hash,
            RoutingSetting::Path => RoutingMode::Path,
            RoutingSetting::Auto => {
                if !self.production_host.is_empty() && hostname.contains(&self.production_host) {
                    RoutingMode::Path
                } else {
                    RoutingMode::Hash
                }
            }
        }
    }
}

/// Slug validation rules.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum number of `/`-separated slug segments.
    pub max_slug_depth: usize,
    /// Regular expression every slug must match.
    pub slug_pattern: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_slug_depth: 3,
            slug_pattern: "^[A-Za-z0-9_/-]+$".to_owned(),
        }
    }
}

/// Search configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of matches shown in the results box.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}

/// Raw preferences configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PreferencesConfigRaw {
    file: Option<String>,
}

/// Preview server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7980,
        }
    }
}

/// Resolved filesystem paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Root of the static bundle (manifest, search index, content).
    pub bundle_dir: PathBuf,
    /// JSON file holding persisted preferences.
    pub preferences_file: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docview.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(bundle_dir) = &settings.bundle_dir {
            self.paths_resolved.bundle_dir.clone_from(bundle_dir);
        }
        if let Some(routing) = settings.routing {
            self.routing.mode = routing;
        }
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            languages: LanguagesConfig::default(),
            routing: RoutingConfig::default(),
            security: SecurityConfig::default(),
            search: SearchConfig::default(),
            preferences: PreferencesConfigRaw::default(),
            server: ServerConfig::default(),
            paths_resolved: PathsConfig {
                bundle_dir: base.to_path_buf(),
                preferences_file: base.join(".docview").join("preferences.json"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_languages()?;
        self.validate_security()?;
        self.validate_site()?;

        if self.search.max_results == 0 {
            return Err(ConfigError::Validation(
                "search.max_results must be greater than 0".to_owned(),
            ));
        }

        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_languages(&self) -> Result<(), ConfigError> {
        if self.languages.supported.is_empty() {
            return Err(ConfigError::Validation(
                "languages.supported cannot be empty".to_owned(),
            ));
        }
        if let Some(blank) = self.languages.supported.iter().find(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "languages.supported contains a blank code: {blank:?}"
            )));
        }
        if !self.languages.supported.contains(&self.languages.default) {
            return Err(ConfigError::Validation(format!(
                "languages.default {:?} is not in languages.supported",
                self.languages.default
            )));
        }
        Ok(())
    }

    fn validate_security(&self) -> Result<(), ConfigError> {
        if self.security.max_slug_depth == 0 {
            return Err(ConfigError::Validation(
                "security.max_slug_depth must be greater than 0".to_owned(),
            ));
        }
        regex::Regex::new(&self.security.slug_pattern).map_err(|e| {
            ConfigError::Validation(format!("security.slug_pattern is not a valid regex: {e}"))
        })?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.doc_version, "site.doc_version")?;
        require_non_empty(&self.site.content_root, "site.content_root")?;
        require_non_empty(&self.site.manifest, "site.manifest")?;
        require_non_empty(&self.site.search_index, "site.search_index")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base_prefix = expand::expand_env(&self.site.base_prefix, "site.base_prefix")?;
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.paths_resolved = PathsConfig {
            bundle_dir: config_dir.join(self.site.bundle_dir.as_deref().unwrap_or(".")),
            preferences_file: config_dir.join(
                self.preferences
                    .file
                    .as_deref()
                    .unwrap_or(".docview/preferences.json"),
            ),
        };
    }
}
