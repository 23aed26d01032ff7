use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::{MenuError, Result};

/// Where a resource (schools CSV, logo) is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    pub fn read_bytes(&self, agent: &ureq::Agent) -> Result<Vec<u8>> {
        match self {
            Self::Path(path) => {
                debug!(path = %path.display(), "reading local file");
                Ok(std::fs::read(path)?)
            }
            Self::Url(url) => {
                debug!(%url, "fetching");
                let mut response = agent
                    .get(url)
                    .call()
                    .map_err(|source| MenuError::Request { url: url.clone(), source })?;

                let status = response.status().as_u16();
                if status != 200 {
                    return Err(MenuError::Http { status, url: url.clone() });
                }

                response
                    .body_mut()
                    .read_to_vec()
                    .map_err(|source| MenuError::Request { url: url.clone(), source })
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Blocking agent shared by every request in a run. Status codes are checked by callers.
pub fn agent() -> ureq::Agent {
    ureq::Agent::new_with_config(
        ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(30)))
            .build(),
    )
}
