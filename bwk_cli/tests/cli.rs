use clap::Parser;
use serde_json::Value;

use bwk_cli::{inner_main, Cli};
use bwk_test_util::{
    closed_port_url, init_logging, txid_hex, unspent_body, MockExplorer, TEST_ADDRESS,
    TEST_ADDRESS_SCRIPT_HEX,
};

#[track_caller]
fn sh_result(command: &str) -> anyhow::Result<Value> {
    init_logging();
    let shell_words = shellwords::split(command).unwrap();
    let cli = Cli::try_parse_from(shell_words).unwrap();
    inner_main(cli)
}

#[track_caller]
pub fn sh(command: &str) -> Value {
    sh_result(command).unwrap()
}

fn sh_err(command: &str) -> String {
    format!("{:?}", sh_result(command).unwrap_err())
}

#[test]
fn utxos() {
    let body = unspent_body(&[(txid_hex(0x02), 1, 20), (txid_hex(0x01), 0, 10)]);
    let explorer = MockExplorer::start(200, &body);
    let url = explorer.url();

    let result = sh(&format!(
        "bwk --url {url} --api-key k utxos --address {TEST_ADDRESS}"
    ));
    let utxos = result.as_array().unwrap();
    assert_eq!(utxos.len(), 2);
    // sorted by txid
    assert_eq!(utxos[0]["vout"], 0);
    assert_eq!(utxos[0]["value"], 10);
    assert_eq!(utxos[0]["height"], 0);
    assert_eq!(utxos[0]["is_coinbase"], false);
    assert_eq!(utxos[0]["script_pubkey"], TEST_ADDRESS_SCRIPT_HEX);
    assert_eq!(utxos[1]["txid"], txid_hex(0x02));

    let request = &explorer.requests()[0];
    assert!(request
        .query()
        .contains(&("key".to_string(), "k".to_string())));
}

#[test]
fn balance() {
    let body = unspent_body(&[(txid_hex(0x01), 0, 10), (txid_hex(0x01), 1, 32)]);
    let explorer = MockExplorer::start(200, &body);
    let url = explorer.url();

    let result = sh(&format!(
        "bwk --network bitcore --url {url} --api-key k --timeout 10 \
         balance --address {TEST_ADDRESS}"
    ));
    assert_eq!(result["address"], TEST_ADDRESS);
    assert_eq!(result["utxos"], 2);
    assert_eq!(result["balance"], 42);
}

#[test]
fn longest_wait() {
    let body = unspent_body(&[(txid_hex(0x01), 0, 10)]);
    let explorer = MockExplorer::start(200, &body);
    let url = explorer.url();

    let result = sh(&format!(
        "bwk --url {url} --api-key k --wait {} balance --address {TEST_ADDRESS}",
        u64::MAX
    ));
    assert_eq!(result["balance"], 10);
}

#[test]
fn errors() {
    let explorer = MockExplorer::start(503, "");
    let url = explorer.url();
    let err = sh_err(&format!(
        "bwk --url {url} --api-key k utxos --address {TEST_ADDRESS}"
    ));
    assert!(err.contains("Server error 503: Service Unavailable"), "{err}");

    let url = closed_port_url();
    let err = sh_err(&format!(
        "bwk --url {url} --api-key k utxos --address {TEST_ADDRESS}"
    ));
    assert!(err.contains("Network problem"), "{err}");

    // a bitcore address is not valid on bitcoin
    let err = sh_err(&format!(
        "bwk --network bitcoin --url {url} --api-key k utxos --address {TEST_ADDRESS}"
    ));
    assert!(err.contains("Invalid address"), "{err}");

    let err = sh_err(&format!(
        "bwk --url not-a-url --api-key k utxos --address {TEST_ADDRESS}"
    ));
    assert!(err.contains("relative URL without a base"), "{err}");
}

#[test]
fn api_key_is_required() {
    std::env::remove_var("BWK_API_KEY");
    let words = shellwords::split(&format!("bwk utxos --address {TEST_ADDRESS}")).unwrap();
    assert!(Cli::try_parse_from(words).is_err());
}
