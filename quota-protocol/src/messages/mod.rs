//! Request and response bodies of the client-quota APIs

pub mod alter_client_quotas_request;
pub mod alter_client_quotas_response;
pub mod describe_client_quotas_request;
pub mod describe_client_quotas_response;

pub use alter_client_quotas_request::*;
pub use alter_client_quotas_response::*;
pub use describe_client_quotas_request::*;
pub use describe_client_quotas_response::*;
