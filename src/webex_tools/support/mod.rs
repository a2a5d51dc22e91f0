mod http_client;
#[cfg(test)]
pub mod mock_client;
pub mod types;
mod webex_client;

pub use http_client::WebexHttpClient;
pub use webex_client::{
    Params, PlatformError, PlatformErrorKind, PlatformResponse, WebexApi, execute,
};
