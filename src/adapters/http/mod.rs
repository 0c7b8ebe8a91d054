//! HTTP adapters. Implement HttpTransport.
//!
//! reqwest-backed transport for real traffic and a scripted transport for tests.

pub mod mock_transport;
pub mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::ReqwestTransport;
