//! SSC Backend - clients for the provisioning server and the session service.

pub mod error;
pub mod protocol;
pub mod provisioning;
pub mod session;
pub mod xmlrpc;

pub use error::BackendError;
pub use protocol::{Command, ResponseLine, SessionRequest};
pub use provisioning::{
    ProvisioningClient, ProvisioningRecord, XmlRpcProvisioningClient, DEFAULT_METHOD, MAC_ADDRESS,
};
pub use session::{humanize_key, SessionClient, SessionRecord, SocketSessionClient};
