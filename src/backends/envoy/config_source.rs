use envoy_api_rs::envoy::config::core::v3::{
    api_config_source::ApiType,
    config_source::ConfigSourceSpecifier,
    grpc_service::{EnvoyGrpc, TargetSpecifier},
    ApiConfigSource, ApiVersion, ConfigSource, GrpcService,
};

use super::XDS_CLUSTER_NAME;

/// Descriptor telling the proxy to fetch a resource from the discovery
/// cluster instead of expecting it inline.
pub enum DiscoverySourceFactory {}

impl DiscoverySourceFactory {
    pub fn make_config_source() -> ConfigSource {
        ConfigSource {
            resource_api_version: ApiVersion::V3.into(),
            config_source_specifier: Some(ConfigSourceSpecifier::ApiConfigSource(ApiConfigSource {
                api_type: ApiType::DeltaGrpc.into(),
                transport_api_version: ApiVersion::V3.into(),
                set_node_on_first_message_only: true,
                grpc_services: vec![GrpcService {
                    target_specifier: Some(TargetSpecifier::EnvoyGrpc(EnvoyGrpc {
                        cluster_name: XDS_CLUSTER_NAME.to_owned(),
                        ..Default::default()
                    })),
                    ..Default::default()
                }],
                ..Default::default()
            })),
            ..Default::default()
        }
    }
}
