use envoy_api_rs::envoy::{
    config::route::v3::{
        header_matcher::HeaderMatchSpecifier,
        route::Action,
        route_action::ClusterSpecifier,
        route_match::PathSpecifier,
        HeaderMatcher, Route as EnvoyRoute, RouteAction, RouteConfiguration, RouteMatch, VirtualHost,
    },
    r#type::matcher::v3::{string_matcher::MatchPattern, StringMatcher},
};
use tracing::debug;

use super::ROUTE_CONFIGURATION_NAME;
use crate::configuration::Route;

pub const VIRTUAL_HOST_NAME: &str = "seldon_service";
pub const HTTP_PATH_PREFIX: &str = "/v2";
pub const GRPC_PATH_PREFIX: &str = "/inference.GRPCInferenceService";
pub const HTTP_HOST_HEADER: &str = "Host";
// gRPC clients carry the model host in their own header rather than in Host
pub const GRPC_HOST_HEADER: &str = "Seldon";

pub fn http_route_name(route: &Route) -> String {
    route.name.clone() + "_http"
}

pub fn grpc_route_name(route: &Route) -> String {
    route.name.clone() + "_grpc"
}

pub enum RouteAssembler {}

impl RouteAssembler {
    /// Single route table served over RDS. Each route contributes its HTTP rule
    /// followed by its gRPC rule; the proxy takes the first match so that
    /// order is part of the output.
    pub fn make_route_configuration(routes: &[Route]) -> RouteConfiguration {
        debug!("Assembling route configuration {ROUTE_CONFIGURATION_NAME} from {} routes", routes.len());
        let envoy_routes = routes.iter().flat_map(|route| [Self::make_http_route(route), Self::make_grpc_route(route)]).collect();

        RouteConfiguration {
            name: ROUTE_CONFIGURATION_NAME.to_owned(),
            virtual_hosts: vec![VirtualHost {
                name: VIRTUAL_HOST_NAME.to_owned(),
                domains: vec!["*".to_owned()],
                routes: envoy_routes,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn make_http_route(route: &Route) -> EnvoyRoute {
        Self::make_route(http_route_name(route), HTTP_PATH_PREFIX, HTTP_HOST_HEADER, &route.host, &route.http_cluster)
    }

    fn make_grpc_route(route: &Route) -> EnvoyRoute {
        Self::make_route(grpc_route_name(route), GRPC_PATH_PREFIX, GRPC_HOST_HEADER, &route.host, &route.grpc_cluster)
    }

    fn make_route(name: String, prefix: &str, header: &str, host: &str, cluster: &str) -> EnvoyRoute {
        let route_match = RouteMatch {
            path_specifier: Some(PathSpecifier::Prefix(prefix.to_owned())),
            headers: vec![HeaderMatcher {
                name: header.to_owned(),
                header_match_specifier: Some(HeaderMatchSpecifier::StringMatch(StringMatcher {
                    match_pattern: Some(MatchPattern::Exact(host.to_owned())),
                    ..Default::default()
                })),
                ..Default::default()
            }],
            ..Default::default()
        };

        EnvoyRoute {
            name,
            r#match: Some(route_match),
            action: Some(Action::Route(RouteAction {
                cluster_specifier: Some(ClusterSpecifier::Cluster(cluster.to_owned())),
                ..Default::default()
            })),
            ..Default::default()
        }
    }
}
