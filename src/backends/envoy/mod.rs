pub mod cluster;
pub mod config_source;
pub mod converters;
pub mod endpoint;
pub mod listener;
pub mod model;
pub mod resource_generator;
pub mod resources;
pub mod route;

pub use cluster::ClusterAssembler;
pub use config_source::DiscoverySourceFactory;
pub use endpoint::EndpointAssembler;
pub use listener::ListenerAssembler;
pub use model::{AssemblyError, AssemblyResult, TypeUrl};
pub use resource_generator::{DiscoveryResources, GeneratedResources, ResourceGenerator};
pub use route::RouteAssembler;

/// Route table name the listeners request over RDS. Must match what the proxy
/// fleet is bootstrapped with.
pub const ROUTE_CONFIGURATION_NAME: &str = "listener_0";
/// Cluster in the proxy bootstrap that points back at the discovery server.
pub const XDS_CLUSTER_NAME: &str = "xds_cluster";
