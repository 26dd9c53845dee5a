use async_graphql::{Error, ErrorExtensions};

use crate::infrastructure::upstream::UpstreamError;

/// Upstream failures become GraphQL field errors: the failing field resolves
/// to null, sibling fields are unaffected, and the error entry carries
/// machine-readable extensions. Transport failures share the response shape
/// of upstream status failures but keep a distinct code so callers and
/// dashboards can tell them apart.
impl ErrorExtensions for UpstreamError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| match self {
            UpstreamError::Status { status, body } => {
                e.set("code", "UPSTREAM_ERROR");
                e.set("status", i32::from(*status));
                if !body.is_empty() {
                    e.set("body", body.as_str());
                }
            }
            UpstreamError::Timeout(_) | UpstreamError::Transport(_) => {
                e.set("code", "TRANSPORT_ERROR");
            }
            UpstreamError::Decode(_) => {
                e.set("code", "UPSTREAM_DECODE");
            }
        })
    }
}
