pub mod config;
pub mod credential;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod server;
pub mod translate;
pub mod transport;

pub use config::GatewayConfig;
pub use credential::Credential;
pub use error::{GatewayError, Result};
pub use logging::SharedLogger;
pub use proxy::GatewayHandler;
pub use server::{build_router, AppState};
pub use transport::{ReqwestTransport, VendorTransport};
