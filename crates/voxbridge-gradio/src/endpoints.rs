//! URL construction for the Gradio queue endpoints.

use url::Url;
use voxbridge_core::SessionHandle;

use crate::error::GradioResult;

/// Resolved endpoint URLs for one Gradio server.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    /// Server root, used for reachability probes.
    pub root: Url,
    /// `POST` target for queue joins.
    pub join: Url,
    /// Event stream base, without the session query.
    data: Url,
}

impl Endpoints {
    pub fn new(base_url: &str, api_prefix: &str) -> GradioResult<Self> {
        let base = base_url.trim_end_matches('/');
        let prefix = normalize_prefix(api_prefix);

        Ok(Self {
            root: Url::parse(&format!("{base}/"))?,
            join: Url::parse(&format!("{base}{prefix}/queue/join"))?,
            data: Url::parse(&format!("{base}{prefix}/queue/data"))?,
        })
    }

    /// Event stream URL for a session.
    pub fn data_for(&self, session: &SessionHandle) -> Url {
        let mut url = self.data.clone();
        url.query_pairs_mut()
            .append_pair("session_hash", session.as_str());
        url
    }
}

/// Ensure a leading slash and no trailing slash; empty stays empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
