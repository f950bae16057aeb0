use envoy_api_rs::envoy::{
    config::{cluster::v3::Cluster as EnvoyCluster, endpoint::v3::ClusterLoadAssignment, listener::v3::Listener as EnvoyListener, route::v3::RouteConfiguration},
    service::discovery::v3::Resource as EnvoyDiscoveryResource,
};
use tracing::{debug, info};

use super::{
    cluster::ClusterAssembler,
    endpoint::EndpointAssembler,
    listener::ListenerAssembler,
    model::{AssemblyResult, TypeUrl},
    resources,
    route::RouteAssembler,
};
use crate::configuration::{ClusterConfig, ClusterDiscovery, Configuration};

/// Typed output of one assembly pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedResources {
    pub clusters: Vec<EnvoyCluster>,
    /// Only clusters discovered over EDS; strict DNS clusters embed theirs.
    pub load_assignments: Vec<ClusterLoadAssignment>,
    pub route_configuration: RouteConfiguration,
    pub listeners: Vec<EnvoyListener>,
}

#[derive(Debug, Default)]
pub struct DiscoveryResources {
    pub clusters: Vec<EnvoyDiscoveryResource>,
    pub load_assignments: Vec<EnvoyDiscoveryResource>,
    pub route_configurations: Vec<EnvoyDiscoveryResource>,
    pub listeners: Vec<EnvoyDiscoveryResource>,
}

impl DiscoveryResources {
    pub fn iter(&self) -> impl Iterator<Item = (TypeUrl, &EnvoyDiscoveryResource)> {
        self.clusters
            .iter()
            .map(|r| (TypeUrl::Cluster, r))
            .chain(self.load_assignments.iter().map(|r| (TypeUrl::ClusterLoadAssignment, r)))
            .chain(self.route_configurations.iter().map(|r| (TypeUrl::RouteConfiguration, r)))
            .chain(self.listeners.iter().map(|r| (TypeUrl::Listener, r)))
    }
}

impl GeneratedResources {
    pub fn to_discovery_resources(&self) -> AssemblyResult<DiscoveryResources> {
        Ok(DiscoveryResources {
            clusters: self.clusters.iter().map(resources::create_cluster_resource).collect::<AssemblyResult<_>>()?,
            load_assignments: self.load_assignments.iter().map(resources::create_load_assignment_resource).collect::<AssemblyResult<_>>()?,
            route_configurations: vec![resources::create_route_configuration_resource(&self.route_configuration)?],
            listeners: self.listeners.iter().map(resources::create_listener_resource).collect::<AssemblyResult<_>>()?,
        })
    }
}

pub struct ResourceGenerator<'a> {
    configuration: &'a Configuration,
}

impl<'a> ResourceGenerator<'a> {
    pub fn new(configuration: &'a Configuration) -> Self {
        Self { configuration }
    }

    pub fn generate_resources(&self) -> AssemblyResult<GeneratedResources> {
        let mut clusters = Vec::with_capacity(self.configuration.clusters.len());
        let mut load_assignments = vec![];
        for cluster in &self.configuration.clusters {
            let (envoy_cluster, load_assignment) = Self::generate_cluster(cluster)?;
            clusters.push(envoy_cluster);
            load_assignments.extend(load_assignment);
        }

        let route_configuration = RouteAssembler::make_route_configuration(&self.configuration.routes);

        let listeners = self
            .configuration
            .listeners
            .iter()
            .map(|l| ListenerAssembler::make_http_listener(&l.name, &l.address, l.port))
            .collect::<AssemblyResult<Vec<_>>>()?;

        info!(
            "Resources generated clusters {} load assignments {} routes {} listeners {}",
            clusters.len(),
            load_assignments.len(),
            self.configuration.routes.len(),
            listeners.len()
        );
        Ok(GeneratedResources {
            clusters,
            load_assignments,
            route_configuration,
            listeners,
        })
    }

    fn generate_cluster(cluster: &ClusterConfig) -> AssemblyResult<(EnvoyCluster, Option<ClusterLoadAssignment>)> {
        match cluster.discovery {
            ClusterDiscovery::StrictDns => Ok((ClusterAssembler::make_cluster(&cluster.name, &cluster.endpoints, cluster.is_grpc())?, None)),
            ClusterDiscovery::Eds => {
                debug!("Cluster {} endpoints delivered over eds", cluster.name);
                Ok((
                    ClusterAssembler::make_eds_cluster(&cluster.name, cluster.is_grpc())?,
                    Some(EndpointAssembler::make_load_assignment(&cluster.name, &cluster.endpoints)),
                ))
            }
        }
    }
}
