use envoy_api_rs::{
    envoy::config::core::v3::{
        address,
        socket_address::{PortSpecifier, Protocol},
        Address, SocketAddress,
    },
    google::protobuf::{Any, Duration},
    prost::Message,
};

use super::model::{AssemblyError, AssemblyResult};

pub enum AnyTypeConverter {}

impl AnyTypeConverter {
    pub fn try_from<Msg: Message>(type_url: &str, msg: &Msg) -> AssemblyResult<Any> {
        let mut value = Vec::with_capacity(msg.encoded_len());
        msg.encode(&mut value).map_err(|source| AssemblyError::ExtensionEncoding { type_url: type_url.to_owned(), source })?;
        Ok(Any { type_url: type_url.to_owned(), value })
    }
}

pub enum DurationConverter {}

impl DurationConverter {
    pub fn from(val: std::time::Duration) -> Duration {
        Duration {
            seconds: i64::try_from(val.as_secs()).unwrap_or(i64::MAX),
            // always below one billion
            nanos: i32::try_from(val.subsec_nanos()).unwrap_or_default(),
        }
    }
}

pub enum SocketAddressFactory {}

impl SocketAddressFactory {
    pub fn from_host_port(host: &str, port: u16) -> Address {
        Address {
            address: Some(address::Address::SocketAddress(SocketAddress {
                protocol: Protocol::Tcp.into(),
                address: host.to_owned(),
                port_specifier: Some(PortSpecifier::PortValue(u32::from(port))),
                ..Default::default()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use envoy_api_rs::{
        envoy::config::core::v3::{
            address,
            socket_address::{PortSpecifier, Protocol},
            Http2ProtocolOptions,
        },
        prost::Message,
    };

    use super::{AnyTypeConverter, DurationConverter, SocketAddressFactory};

    #[test]
    pub fn test_any_envelope_decodes_back() {
        let options = Http2ProtocolOptions::default();
        let any = AnyTypeConverter::try_from("type.googleapis.com/envoy.config.core.v3.Http2ProtocolOptions", &options).unwrap();
        assert_eq!(any.type_url, "type.googleapis.com/envoy.config.core.v3.Http2ProtocolOptions");
        assert_eq!(Http2ProtocolOptions::decode(any.value.as_slice()).unwrap(), options);
    }

    #[test]
    pub fn test_duration() {
        let duration = DurationConverter::from(std::time::Duration::from_millis(5250));
        assert_eq!(duration.seconds, 5);
        assert_eq!(duration.nanos, 250_000_000);
    }

    #[test]
    pub fn test_socket_address() {
        let envoy_address = SocketAddressFactory::from_host_port("model-a.seldon", 9000);
        let Some(address::Address::SocketAddress(socket_address)) = envoy_address.address else {
            panic!("expected a socket address");
        };
        assert_eq!(socket_address.address, "model-a.seldon");
        assert_eq!(socket_address.port_specifier, Some(PortSpecifier::PortValue(9000)));
        assert_eq!(socket_address.protocol, i32::from(Protocol::Tcp));
    }
}
