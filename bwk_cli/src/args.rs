use bwk_fetcher::BITCORE_CRYPTOID_URL;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Network {
    Bitcore,
    Bitcoin,
    Testnet,
}

impl From<Network> for bwk_common::Network {
    fn from(value: Network) -> Self {
        match value {
            Network::Bitcore => bwk_common::Network::Bitcore,
            Network::Bitcoin => bwk_common::Network::Bitcoin,
            Network::Testnet => bwk_common::Network::Testnet,
        }
    }
}

/// Query a block explorer for the unspent outputs of an address.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network of the queried address
    #[arg(short, long, default_value = "bitcore")]
    pub network: Network,

    /// Base url of the cryptoid API
    #[arg(long, env = "BWK_URL", default_value = BITCORE_CRYPTOID_URL)]
    pub url: String,

    /// Key of the cryptoid API
    #[arg(long, env = "BWK_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Timeout of the HTTP request in seconds, none by default
    #[arg(long)]
    pub timeout: Option<u8>,

    /// Seconds to wait for the result before giving up
    #[arg(long, default_value_t = 120)]
    pub wait: u64,

    /// The sub command
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List the unspent outputs of an address
    Utxos {
        #[arg(long)]
        address: String,
    },

    /// Sum the unspent outputs of an address
    Balance {
        #[arg(long)]
        address: String,
    },
}

impl CliCommand {
    pub(crate) fn address(&self) -> &str {
        match self {
            CliCommand::Utxos { address } | CliCommand::Balance { address } => address,
        }
    }
}
