mod builders;
mod dns_server_mock;
mod scripted_transport;

pub use builders::*;
pub use dns_server_mock::*;
pub use scripted_transport::*;
