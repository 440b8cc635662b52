//! Helpers shared by the tests of the workspace crates.

mod explorer;

pub use explorer::{closed_port_url, MockExplorer, RecordedRequest};

use serde_json::json;

/// A BitCore pay-to-pubkey-hash address, hash160 `62e907b15cbf27d5425399ebf6f0fb50ebb88f18`
pub const TEST_ADDRESS: &str = "2N2oLLYFCwfH81SUReTcuhtoEHgwHYHQNq";

/// The locking script of [`TEST_ADDRESS`]
pub const TEST_ADDRESS_SCRIPT_HEX: &str = "76a91462e907b15cbf27d5425399ebf6f0fb50ebb88f1888ac";

/// A BitCore pay-to-script-hash address, hash160 `b472a266d0bd89c13706a4132ccfb16f7c3b9fcb`
pub const TEST_ADDRESS_P2SH: &str = "sahX33HPSCiBLPVos4cs3qe83Pi2hxaqHf";

/// The locking script of [`TEST_ADDRESS_P2SH`]
pub const TEST_ADDRESS_P2SH_SCRIPT_HEX: &str = "a914b472a266d0bd89c13706a4132ccfb16f7c3b9fcb87";

pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// A 64 chars hex transaction hash made of the repeated `byte`
pub fn txid_hex(byte: u8) -> String {
    format!("{byte:02x}").repeat(32)
}

/// The body of a cryptoid `unspent` response listing `(tx_hash, tx_ouput_n, value)` outputs
pub fn unspent_body(outputs: &[(String, u32, u64)]) -> String {
    let outputs: Vec<_> = outputs
        .iter()
        .map(|(tx_hash, n, value)| {
            json!({
                "tx_hash": tx_hash,
                "tx_ouput_n": n,
                "value": value,
                "confirmations": 1,
            })
        })
        .collect();
    json!({ "unspent_outputs": outputs }).to_string()
}
