//! Wire-level view of the hived API: request resolution and response
//! decoding.

mod decode;
mod types;
mod url;

pub use decode::{
    decode, MESSAGE_CONTAINER_DESTROYED, MESSAGE_CONTAINER_STARTED, MESSAGE_CONTAINER_STOPPED,
};
pub use types::{ContainerInfo, Envelope, HostContainers, HostPools, HostStats};
pub use url::{resolve, Method, ResolvedRequest};
