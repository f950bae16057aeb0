use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Deserialize;
use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder, Deserialize)]
pub struct Endpoint {
    pub upstream_host: String,
    pub upstream_port: u16,
}

/// A logical service reachable over HTTP and gRPC. Clusters are referenced by
/// name and only resolved by the proxy.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder, Deserialize)]
pub struct Route {
    pub name: String,
    pub host: String,
    pub http_cluster: String,
    pub grpc_cluster: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterProtocol {
    #[default]
    Http,
    Grpc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterDiscovery {
    #[default]
    StrictDns,
    Eds,
}

#[derive(Clone, Debug, TypedBuilder, Deserialize)]
pub struct ClusterConfig {
    pub name: String,
    #[serde(default)]
    #[builder(default)]
    pub protocol: ClusterProtocol,
    #[serde(default)]
    #[builder(default)]
    pub discovery: ClusterDiscovery,
    #[serde(default)]
    #[builder(default)]
    pub endpoints: Vec<Endpoint>,
}

impl ClusterConfig {
    pub fn is_grpc(&self) -> bool {
        self.protocol == ClusterProtocol::Grpc
    }
}

#[derive(Clone, Debug, TypedBuilder, Deserialize)]
pub struct ListenerConfig {
    pub name: String,
    pub address: String,
    pub port: u16,
}

#[derive(Debug, TypedBuilder, Deserialize)]
pub struct Configuration {
    pub listeners: Vec<ListenerConfig>,
    #[serde(default)]
    #[builder(default)]
    pub clusters: Vec<ClusterConfig>,
    #[serde(default)]
    #[builder(default)]
    pub routes: Vec<Route>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("at least one listener must be configured")]
    NoListeners,
    #[error("listener {0} is defined more than once")]
    DuplicateListener(String),
    #[error("cluster {0} is defined more than once")]
    DuplicateCluster(String),
    #[error("route {0} is defined more than once")]
    DuplicateRoute(String),
    #[error("route {route} refers to undefined cluster {cluster}")]
    UnknownCluster { route: String, cluster: String },
}

impl Configuration {
    /// Referential checks the assemblers never perform themselves.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(std::convert::Into::into)
    }

    fn check(&self) -> std::result::Result<(), ConfigurationError> {
        if self.listeners.is_empty() {
            return Err(ConfigurationError::NoListeners);
        }
        if let Some(name) = self.listeners.iter().map(|l| &l.name).duplicates().next() {
            return Err(ConfigurationError::DuplicateListener(name.clone()));
        }
        if let Some(name) = self.clusters.iter().map(|c| &c.name).duplicates().next() {
            return Err(ConfigurationError::DuplicateCluster(name.clone()));
        }
        if let Some(name) = self.routes.iter().map(|r| &r.name).duplicates().next() {
            return Err(ConfigurationError::DuplicateRoute(name.clone()));
        }

        let cluster_names: BTreeSet<_> = self.clusters.iter().map(|c| c.name.as_str()).collect();
        for route in &self.routes {
            for cluster in [&route.http_cluster, &route.grpc_cluster] {
                if !cluster_names.contains(cluster.as_str()) {
                    return Err(ConfigurationError::UnknownCluster {
                        route: route.name.clone(),
                        cluster: cluster.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
