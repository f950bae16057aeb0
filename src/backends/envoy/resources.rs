use envoy_api_rs::envoy::{
    config::{cluster::v3::Cluster, endpoint::v3::ClusterLoadAssignment, listener::v3::Listener, route::v3::RouteConfiguration},
    service::discovery::v3::Resource,
};

use super::{
    converters::AnyTypeConverter,
    model::{AssemblyResult, TypeUrl},
};

fn create_resource<Msg: envoy_api_rs::prost::Message>(name: &str, type_url: TypeUrl, msg: &Msg) -> AssemblyResult<Resource> {
    let any = AnyTypeConverter::try_from(&type_url.to_string(), msg)?;

    let mut resource = Resource { ..Default::default() };
    name.clone_into(&mut resource.name);
    resource.resource = Some(any);
    Ok(resource)
}

pub fn create_cluster_resource(cluster: &Cluster) -> AssemblyResult<Resource> {
    create_resource(&cluster.name, TypeUrl::Cluster, cluster)
}

pub fn create_load_assignment_resource(load_assignment: &ClusterLoadAssignment) -> AssemblyResult<Resource> {
    create_resource(&load_assignment.cluster_name, TypeUrl::ClusterLoadAssignment, load_assignment)
}

pub fn create_route_configuration_resource(route_configuration: &RouteConfiguration) -> AssemblyResult<Resource> {
    create_resource(&route_configuration.name, TypeUrl::RouteConfiguration, route_configuration)
}

pub fn create_listener_resource(listener: &Listener) -> AssemblyResult<Resource> {
    create_resource(&listener.name, TypeUrl::Listener, listener)
}

#[cfg(test)]
mod tests {
    use envoy_api_rs::{envoy::config::listener::v3::Listener, prost::Message};

    use super::create_listener_resource;
    use crate::backends::envoy::listener::ListenerAssembler;

    #[test]
    pub fn test_listener_resource_wraps_listener() {
        let listener = ListenerAssembler::make_http_listener("seldon_http", "0.0.0.0", 9000).unwrap();
        let resource = create_listener_resource(&listener).unwrap();
        assert_eq!(resource.name, "seldon_http");
        let any = resource.resource.unwrap();
        assert_eq!(any.type_url, "type.googleapis.com/envoy.config.listener.v3.Listener");
        assert_eq!(Listener::decode(any.value.as_slice()).unwrap(), listener);
    }
}
