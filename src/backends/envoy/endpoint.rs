use envoy_api_rs::envoy::config::endpoint::v3::{lb_endpoint::HostIdentifier, ClusterLoadAssignment, Endpoint as EnvoyEndpoint, LbEndpoint, LocalityLbEndpoints};
use tracing::debug;

use super::converters::SocketAddressFactory;
use crate::configuration::Endpoint;

pub enum EndpointAssembler {}

impl EndpointAssembler {
    /// One locality holding every endpoint in input order. An empty slice is a
    /// cluster with no backends yet, not an error.
    pub fn make_load_assignment(cluster_name: &str, endpoints: &[Endpoint]) -> ClusterLoadAssignment {
        debug!("Assembling load assignment for {cluster_name} with {} endpoints", endpoints.len());
        let lb_endpoints = endpoints
            .iter()
            .map(|e| LbEndpoint {
                host_identifier: Some(HostIdentifier::Endpoint(EnvoyEndpoint {
                    address: Some(SocketAddressFactory::from_host_port(&e.upstream_host, e.upstream_port)),
                    ..Default::default()
                })),
                ..Default::default()
            })
            .collect();

        ClusterLoadAssignment {
            cluster_name: cluster_name.to_owned(),
            endpoints: vec![LocalityLbEndpoints { lb_endpoints, ..Default::default() }],
            ..Default::default()
        }
    }
}
