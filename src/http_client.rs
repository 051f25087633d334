use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

use crate::error::{BolaoError, Result};

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide blocking client. The timeout of the first caller sticks.
pub fn http_client(timeout: Duration) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bolao_terminal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| BolaoError::Feed(format!("failed to build http client: {err}")))
    })
}
