use envoy_api_rs::envoy::{
    config::listener::v3::{filter, Filter, FilterChain, Listener as EnvoyListener},
    extensions::filters::{
        http::router::v3::Router,
        network::http_connection_manager::v3::{
            http_connection_manager::{CodecType, RouteSpecifier},
            http_filter, HttpConnectionManager, HttpFilter, Rds,
        },
    },
};
use tracing::debug;

use super::{
    config_source::DiscoverySourceFactory,
    converters::{AnyTypeConverter, SocketAddressFactory},
    model::AssemblyResult,
    ROUTE_CONFIGURATION_NAME,
};

pub const HTTP_CONNECTION_MANAGER_FILTER_NAME: &str = "envoy.filters.network.http_connection_manager";
pub const ROUTER_FILTER_NAME: &str = "envoy.filters.http.router";
pub const HTTP_STAT_PREFIX: &str = "http";
const HTTP_CONNECTION_MANAGER_TYPE_URL: &str = "type.googleapis.com/envoy.extensions.filters.network.http_connection_manager.v3.HttpConnectionManager";
const ROUTER_TYPE_URL: &str = "type.googleapis.com/envoy.extensions.filters.http.router.v3.Router";

pub enum ListenerAssembler {}

impl ListenerAssembler {
    pub fn make_http_listener(listener_name: &str, address: &str, port: u16) -> AssemblyResult<EnvoyListener> {
        debug!("Assembling listener {listener_name} on {address}:{port}");
        let http_connection_manager_any = AnyTypeConverter::try_from(HTTP_CONNECTION_MANAGER_TYPE_URL, &Self::make_http_connection_manager()?)?;

        let http_connection_manager_filter = Filter {
            name: HTTP_CONNECTION_MANAGER_FILTER_NAME.to_owned(),
            config_type: Some(filter::ConfigType::TypedConfig(http_connection_manager_any)),
        };

        Ok(EnvoyListener {
            name: listener_name.to_owned(),
            address: Some(SocketAddressFactory::from_host_port(address, port)),
            filter_chains: vec![FilterChain {
                filters: vec![http_connection_manager_filter],
                ..Default::default()
            }],
            ..Default::default()
        })
    }

    /// Auto codec so HTTP/1.1 and HTTP/2 (gRPC) share the listener. Routes are
    /// always fetched over RDS by name, never inlined.
    pub fn make_http_connection_manager() -> AssemblyResult<HttpConnectionManager> {
        let router_filter = HttpFilter {
            name: ROUTER_FILTER_NAME.to_owned(),
            config_type: Some(http_filter::ConfigType::TypedConfig(AnyTypeConverter::try_from(ROUTER_TYPE_URL, &Router::default())?)),
            ..Default::default()
        };

        Ok(HttpConnectionManager {
            codec_type: CodecType::Auto.into(),
            stat_prefix: HTTP_STAT_PREFIX.to_owned(),
            route_specifier: Some(RouteSpecifier::Rds(Rds {
                config_source: Some(DiscoverySourceFactory::make_config_source()),
                route_config_name: ROUTE_CONFIGURATION_NAME.to_owned(),
            })),
            http_filters: vec![router_filter],
            ..Default::default()
        })
    }
}
