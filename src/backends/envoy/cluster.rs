use std::{collections::HashMap, time::Duration};

use envoy_api_rs::{
    envoy::{
        config::{
            cluster::v3::{
                cluster::{ClusterDiscoveryType, DiscoveryType, DnsLookupFamily, EdsClusterConfig, LbPolicy},
                Cluster as EnvoyCluster,
            },
            core::v3::Http2ProtocolOptions,
        },
        extensions::upstreams::http::v3::{
            http_protocol_options::{explicit_http_config::ProtocolConfig, ExplicitHttpConfig, UpstreamProtocolOptions},
            HttpProtocolOptions,
        },
    },
    google::protobuf::Any,
};
use tracing::debug;

use super::{
    config_source::DiscoverySourceFactory,
    converters::{AnyTypeConverter, DurationConverter},
    endpoint::EndpointAssembler,
    model::AssemblyResult,
};
use crate::configuration::Endpoint;

pub const HTTP_PROTOCOL_OPTIONS_EXTENSION: &str = "envoy.extensions.upstreams.http.v3.HttpProtocolOptions";
const HTTP_PROTOCOL_OPTIONS_TYPE_URL: &str = "type.googleapis.com/envoy.extensions.upstreams.http.v3.HttpProtocolOptions";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub enum ClusterAssembler {}

impl ClusterAssembler {
    /// Strict DNS cluster carrying its endpoints inline.
    pub fn make_cluster(cluster_name: &str, endpoints: &[Endpoint], is_grpc: bool) -> AssemblyResult<EnvoyCluster> {
        debug!("Assembling strict dns cluster {cluster_name} grpc {is_grpc}");
        Ok(EnvoyCluster {
            cluster_discovery_type: Some(ClusterDiscoveryType::Type(DiscoveryType::StrictDns.into())),
            load_assignment: Some(EndpointAssembler::make_load_assignment(cluster_name, endpoints)),
            ..Self::make_base_cluster(cluster_name, is_grpc)?
        })
    }

    /// Cluster whose endpoints arrive separately as a `ClusterLoadAssignment`
    /// fetched from the discovery cluster.
    pub fn make_eds_cluster(cluster_name: &str, is_grpc: bool) -> AssemblyResult<EnvoyCluster> {
        debug!("Assembling eds cluster {cluster_name} grpc {is_grpc}");
        Ok(EnvoyCluster {
            cluster_discovery_type: Some(ClusterDiscoveryType::Type(DiscoveryType::Eds.into())),
            eds_cluster_config: Some(Self::make_eds_cluster_config()),
            ..Self::make_base_cluster(cluster_name, is_grpc)?
        })
    }

    pub fn make_eds_cluster_config() -> EdsClusterConfig {
        EdsClusterConfig {
            eds_config: Some(DiscoverySourceFactory::make_config_source()),
            ..Default::default()
        }
    }

    fn make_base_cluster(cluster_name: &str, is_grpc: bool) -> AssemblyResult<EnvoyCluster> {
        let typed_extension_protocol_options = if is_grpc {
            HashMap::from([(HTTP_PROTOCOL_OPTIONS_EXTENSION.to_owned(), Self::make_grpc_protocol_options()?)])
        } else {
            HashMap::new()
        };

        Ok(EnvoyCluster {
            name: cluster_name.to_owned(),
            connect_timeout: Some(DurationConverter::from(CONNECT_TIMEOUT)),
            lb_policy: LbPolicy::RoundRobin.into(),
            dns_lookup_family: DnsLookupFamily::V4Only.into(),
            typed_extension_protocol_options,
            ..Default::default()
        })
    }

    // gRPC needs HTTP/2 towards the upstream
    fn make_grpc_protocol_options() -> AssemblyResult<Any> {
        let grpc_protocol_options = HttpProtocolOptions {
            upstream_protocol_options: Some(UpstreamProtocolOptions::ExplicitHttpConfig(ExplicitHttpConfig {
                protocol_config: Some(ProtocolConfig::Http2ProtocolOptions(Http2ProtocolOptions::default())),
            })),
            ..Default::default()
        };
        AnyTypeConverter::try_from(HTTP_PROTOCOL_OPTIONS_TYPE_URL, &grpc_protocol_options)
    }
}

#[cfg(test)]
mod tests {
    use envoy_api_rs::{
        envoy::{
            config::cluster::v3::cluster::{ClusterDiscoveryType, DiscoveryType, DnsLookupFamily, LbPolicy},
            extensions::upstreams::http::v3::{
                http_protocol_options::{explicit_http_config::ProtocolConfig, ExplicitHttpConfig, UpstreamProtocolOptions},
                HttpProtocolOptions,
            },
        },
        prost::Message,
    };

    use super::{ClusterAssembler, HTTP_PROTOCOL_OPTIONS_EXTENSION};
    use crate::{backends::envoy::config_source::DiscoverySourceFactory, configuration::Endpoint};

    fn endpoints() -> Vec<Endpoint> {
        vec![
            Endpoint::builder().upstream_host("10.0.0.1".to_owned()).upstream_port(9000).build(),
            Endpoint::builder().upstream_host("10.0.0.2".to_owned()).upstream_port(9000).build(),
        ]
    }

    #[test]
    pub fn test_http_cluster() {
        let cluster = ClusterAssembler::make_cluster("cl-http-a", &endpoints(), false).unwrap();
        assert_eq!(cluster.name, "cl-http-a");
        assert_eq!(cluster.cluster_discovery_type, Some(ClusterDiscoveryType::Type(DiscoveryType::StrictDns.into())));
        assert_eq!(cluster.lb_policy, i32::from(LbPolicy::RoundRobin));
        assert_eq!(cluster.dns_lookup_family, i32::from(DnsLookupFamily::V4Only));
        let connect_timeout = cluster.connect_timeout.unwrap();
        assert_eq!((connect_timeout.seconds, connect_timeout.nanos), (5, 0));
        assert!(cluster.typed_extension_protocol_options.is_empty());
        assert!(cluster.eds_cluster_config.is_none());

        let load_assignment = cluster.load_assignment.unwrap();
        assert_eq!(load_assignment.cluster_name, "cl-http-a");
        assert_eq!(load_assignment.endpoints[0].lb_endpoints.len(), 2);
    }

    #[test]
    pub fn test_grpc_cluster_forces_http2() {
        let cluster = ClusterAssembler::make_cluster("cl-grpc-a", &endpoints(), true).unwrap();
        assert_eq!(cluster.typed_extension_protocol_options.len(), 1);

        let any = &cluster.typed_extension_protocol_options[HTTP_PROTOCOL_OPTIONS_EXTENSION];
        assert_eq!(any.type_url, "type.googleapis.com/envoy.extensions.upstreams.http.v3.HttpProtocolOptions");
        let options = HttpProtocolOptions::decode(any.value.as_slice()).unwrap();
        let Some(UpstreamProtocolOptions::ExplicitHttpConfig(ExplicitHttpConfig {
            protocol_config: Some(ProtocolConfig::Http2ProtocolOptions(_)),
            ..
        })) = options.upstream_protocol_options
        else {
            panic!("expected explicit http2 config {options:?}");
        };
    }

    #[test]
    pub fn test_grpc_flag_alone_decides_protocol_options() {
        for is_grpc in [false, true] {
            let strict_dns = ClusterAssembler::make_cluster("cluster", &endpoints(), is_grpc).unwrap();
            let eds = ClusterAssembler::make_eds_cluster("cluster", is_grpc).unwrap();
            assert_eq!(strict_dns.typed_extension_protocol_options.contains_key(HTTP_PROTOCOL_OPTIONS_EXTENSION), is_grpc);
            assert_eq!(eds.typed_extension_protocol_options.contains_key(HTTP_PROTOCOL_OPTIONS_EXTENSION), is_grpc);
        }
    }

    #[test]
    pub fn test_eds_cluster_points_at_discovery_source() {
        let cluster = ClusterAssembler::make_eds_cluster("cl-http-b", false).unwrap();
        assert_eq!(cluster.cluster_discovery_type, Some(ClusterDiscoveryType::Type(DiscoveryType::Eds.into())));
        assert!(cluster.load_assignment.is_none());
        assert_eq!(cluster.eds_cluster_config.unwrap().eds_config, Some(DiscoverySourceFactory::make_config_source()));
    }

    #[test]
    pub fn test_cluster_is_idempotent() {
        assert_eq!(
            ClusterAssembler::make_cluster("cl-grpc-a", &endpoints(), true).unwrap(),
            ClusterAssembler::make_cluster("cl-grpc-a", &endpoints(), true).unwrap()
        );
    }
}
