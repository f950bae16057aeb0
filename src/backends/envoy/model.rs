use std::{fmt, result::Result as StdResult};

use envoy_api_rs::prost;
use serde::Deserialize;
use thiserror::Error;

#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, Deserialize)]
pub enum TypeUrl {
    Listener,
    Cluster,
    RouteConfiguration,
    ClusterLoadAssignment,
}

impl fmt::Display for TypeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TypeUrl::Listener => "type.googleapis.com/envoy.config.listener.v3.Listener",
                TypeUrl::Cluster => "type.googleapis.com/envoy.config.cluster.v3.Cluster",
                TypeUrl::RouteConfiguration => "type.googleapis.com/envoy.config.route.v3.RouteConfiguration",
                TypeUrl::ClusterLoadAssignment => "type.googleapis.com/envoy.config.endpoint.v3.ClusterLoadAssignment",
            }
        )
    }
}

impl TryFrom<&str> for TypeUrl {
    type Error = AssemblyError;

    fn try_from(type_url_string: &str) -> StdResult<TypeUrl, AssemblyError> {
        match type_url_string {
            "type.googleapis.com/envoy.config.listener.v3.Listener" => Ok(TypeUrl::Listener),
            "type.googleapis.com/envoy.config.cluster.v3.Cluster" => Ok(TypeUrl::Cluster),
            "type.googleapis.com/envoy.config.route.v3.RouteConfiguration" => Ok(TypeUrl::RouteConfiguration),
            "type.googleapis.com/envoy.config.endpoint.v3.ClusterLoadAssignment" => Ok(TypeUrl::ClusterLoadAssignment),
            value => Err(AssemblyError::UnknownResourceType(value.to_owned())),
        }
    }
}

/// Failures of an assembly pass. None of them is retryable: they point at a
/// static defect in the extension schema or in the caller, so the whole pass
/// is abandoned and no partially built resource escapes.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("unable to encode {type_url} into a typed envelope: {source}")]
    ExtensionEncoding {
        type_url: String,
        #[source]
        source: prost::EncodeError,
    },
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
}

pub type AssemblyResult<T> = StdResult<T, AssemblyError>;

#[cfg(test)]
mod tests {
    use super::TypeUrl;

    #[test]
    pub fn test_type_url_parsing() {
        for type_url in [TypeUrl::Listener, TypeUrl::Cluster, TypeUrl::RouteConfiguration, TypeUrl::ClusterLoadAssignment] {
            let parsed = TypeUrl::try_from(type_url.to_string().as_str()).unwrap();
            assert_eq!(parsed, type_url);
        }
    }

    #[test]
    pub fn test_unknown_type_url() {
        let err = TypeUrl::try_from("type.googleapis.com/envoy.extensions.transport_sockets.tls.v3.Secret").unwrap_err();
        assert_eq!(err.to_string(), "unknown resource type: type.googleapis.com/envoy.extensions.transport_sockets.tls.v3.Secret");
    }
}
