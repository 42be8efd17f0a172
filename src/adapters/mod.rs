/// Adapter implementations of the port traits
pub mod encoder;
pub mod services;
pub mod transport;

pub use encoder::PcmEncoder;
pub use transport::ReqwestTransport;
