use std::path::PathBuf;
use std::{env, fmt, fs};

use anyhow::{Context, Result};
use tracing::warn;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.thedataincubator.com";
pub const LOCAL_GAE_BASE_URL: &str = "http://localhost:8080";

const BASE_URL_FILE: &str = ".grader_url";
const API_KEY_FILE: &str = ".grader_secret";
const MODE_VAR: &str = "GRADER_CLIENT_MODE";

// Shared fallback key: submissions are still accepted and reported, but not
// recorded against a learner account.
const FALLBACK_API_KEY: &str = "bcgzmGuIB9yAlmshSuLy";

/// Where grading requests go. Chosen once at process start and never
/// re-evaluated per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientMode {
    /// Grade against the remote scoring service.
    #[default]
    Remote,
    /// Grade in-process against locally registered questions.
    Local,
    /// Remote calls, redirected to a local test server.
    LocalGae,
}

impl ClientMode {
    pub fn from_env() -> Self {
        match env::var(MODE_VAR) {
            Ok(mode) => Self::parse(&mode),
            Err(_) => Self::Remote,
        }
    }

    pub fn parse(mode: &str) -> Self {
        match mode {
            "local" => Self::Local,
            "local_gae" => Self::LocalGae,
            _ => Self::Remote,
        }
    }
}

/// Process-wide grading configuration, read once at startup and treated as
/// read-only afterwards.
#[derive(Clone)]
pub struct Config {
    base_url: Url,
    api_key: String,
    mode: ClientMode,
}

impl Config {
    /// Discovers configuration the way the course environment lays it out:
    /// base URL and API key from dotfiles under `~/.ssh/`, mode from
    /// `GRADER_CLIENT_MODE`. Missing dotfiles fall back to the public
    /// default host and the shared key, each with a warning.
    pub fn from_env() -> Result<Self> {
        let mode = ClientMode::from_env();

        let base_url = match mode {
            ClientMode::LocalGae => {
                Url::parse(LOCAL_GAE_BASE_URL).context("local test server URL")?
            }
            _ => match read_ssh_dotfile(BASE_URL_FILE) {
                Some(url) => Url::parse(&url)
                    .with_context(|| format!("malformed base URL in ~/.ssh/{BASE_URL_FILE}"))?,
                None => {
                    warn!(
                        "no ~/.ssh/{BASE_URL_FILE} found; submissions will go to {DEFAULT_BASE_URL}"
                    );
                    Url::parse(DEFAULT_BASE_URL).context("default base URL")?
                }
            },
        };

        let api_key = read_ssh_dotfile(API_KEY_FILE).unwrap_or_else(|| {
            warn!(
                "no ~/.ssh/{API_KEY_FILE} found; scores will be reported but not recorded. \
                 Please show this message to a course staff member."
            );
            FALLBACK_API_KEY.to_owned()
        });

        Ok(Self::new(base_url, api_key, mode))
    }

    pub fn new(base_url: Url, api_key: String, mode: ClientMode) -> Self {
        Self {
            base_url,
            api_key,
            mode,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<hidden>")
            .field("mode", &self.mode)
            .finish()
    }
}

fn read_ssh_dotfile(file_name: &str) -> Option<String> {
    let home = env::var("HOME").ok()?;
    let path = PathBuf::from(home).join(".ssh").join(file_name);
    let contents = fs::read_to_string(path).ok()?;
    let contents = contents.trim().to_owned();
    (!contents.is_empty()).then_some(contents)
}
