pub mod backend;
pub mod error;
mod http;
pub mod ibge;
mod retry;
pub mod types;

pub use backend::BackendClient;
pub use error::ClientError;
pub use http::HttpOptions;
pub use ibge::IbgeClient;
pub use types::{IbgeCity, IbgeUf};
