#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! `bwk`: print the unspent outputs or the balance of an address as JSON.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{anyhow, Context};
use bwk_common::{total_value, Address, Utxo};
use bwk_fetcher::{
    BalanceFetcher, CryptoidClient, CryptoidClientBuilder, Looper, MessageArg, MessageId,
    ResultCallback,
};
use serde_json::{json, Value};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

use crate::args::CliCommand;
pub use args::{Cli, Network};

mod args;

pub fn inner_main(args: args::Cli) -> anyhow::Result<Value> {
    let (appender, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(appender);
    match subscriber.try_init() {
        Ok(_) => tracing::info!("logging initialized"),
        Err(_) => tracing::debug!("logging already initialized"),
    }

    tracing::info!(
        "CLI initialized with network: {:?} url: {} command: {:?}",
        args.network,
        args.url,
        args.command
    );

    let network: bwk_common::Network = args.network.into();
    let address = Address::parse(args.command.address(), network)
        .with_context(|| format!("Invalid address '{}' on {network}", args.command.address()))?;

    let mut builder = CryptoidClientBuilder::new(&args.url, &args.api_key);
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let mut utxos: Vec<Utxo> = fetch(client, &address, Duration::from_secs(args.wait))?
        .into_iter()
        .collect();
    utxos.sort_by(|a, b| (a.txid, a.vout, a.value).cmp(&(b.txid, b.vout, b.value)));

    Ok(match args.command {
        CliCommand::Utxos { .. } => serde_json::to_value(&utxos)?,
        CliCommand::Balance { .. } => json!({
            "address": address,
            "utxos": utxos.len(),
            "balance": total_value(&utxos),
        }),
    })
}

type Outcome = Result<HashSet<Utxo>, String>;

/// Keeps the outcome of the fetch, called on the looper of the main thread
#[derive(Default)]
struct Collector(Mutex<Option<Outcome>>);

impl Collector {
    fn set(&self, outcome: Outcome) {
        if let Ok(mut inner) = self.0.lock() {
            *inner = Some(outcome);
        }
    }

    fn take(&self) -> Option<Outcome> {
        self.0.lock().ok().and_then(|mut inner| inner.take())
    }

    fn is_set(&self) -> bool {
        self.0.lock().map(|inner| inner.is_some()).unwrap_or(true)
    }
}

impl ResultCallback for Collector {
    fn on_result(&self, utxos: HashSet<Utxo>) {
        self.set(Ok(utxos));
    }

    fn on_fail(&self, message: MessageId, args: &[MessageArg]) {
        self.set(Err(message.format(args)));
    }
}

fn fetch(
    client: CryptoidClient,
    address: &Address,
    wait: Duration,
) -> anyhow::Result<HashSet<Utxo>> {
    let rt = tokio::runtime::Runtime::new()?;
    let looper = Looper::prepare()?;
    let collector = Arc::new(Collector::default());
    let fetcher = BalanceFetcher::new(rt.handle().clone(), client, collector.clone())?;

    fetcher.fetch((), address);

    if !looper.run_until(wait, || collector.is_set()) {
        return Err(anyhow!("No answer from the explorer after {}s", wait.as_secs()));
    }
    match collector.take() {
        Some(Ok(utxos)) => Ok(utxos),
        Some(Err(message)) => Err(anyhow!(message)),
        None => Err(anyhow!("Fetch outcome lost")),
    }
}
