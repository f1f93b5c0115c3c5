//! CLI command implementations

pub mod read;
pub mod write;

use okcpu_primitives::TokenId;
use okcpu_sdk::OkComputer;

use crate::{config::Config, CliError};

/// Build a client acting as the given token.
pub(crate) fn client(config: &Config, token: TokenId) -> OkComputer {
    OkComputer::with_url(token, &config.rpc_url)
}

/// Build a client for reads that do not depend on the acting computer.
pub(crate) fn reader(config: &Config) -> OkComputer {
    client(config, config.token.unwrap_or(0))
}

/// Resolve the acting token id, either from --token or the config file.
pub(crate) fn resolve_token(config: &Config) -> Result<TokenId, CliError> {
    config.token.ok_or_else(|| {
        CliError::Config(
            "no token id set; pass --token <id> or run `okcpu config --set-token <id>`"
                .to_string(),
        )
    })
}
