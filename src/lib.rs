pub mod backends;
pub mod configuration;

pub use backends::envoy::{AssemblyError, DiscoveryResources, GeneratedResources, ResourceGenerator};
pub use configuration::Configuration;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
