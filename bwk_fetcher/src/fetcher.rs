use std::{collections::HashSet, sync::Arc};

use bwk_common::{Address, Utxo};
use tokio::runtime::Handle;

use crate::{CryptoidClient, Error, FetchFailure, Handler, MessageArg, MessageId};

/// Receives the outcome of [`BalanceFetcher::fetch`], always on the thread that created the
/// fetcher.
pub trait ResultCallback: Send + Sync {
    /// The unspent outputs of the queried address
    fn on_result(&self, utxos: HashSet<Utxo>);

    /// The query failed, `args` are the arguments of the `message`
    fn on_fail(&self, message: MessageId, args: &[MessageArg]);
}

/// Fetches the unspent outputs of an address on a worker runtime and delivers the outcome on the
/// [`crate::Looper`] of the thread that created it.
pub struct BalanceFetcher {
    worker: Handle,
    callback: Handler,
    client: CryptoidClient,
    result_callback: Arc<dyn ResultCallback>,
}

impl BalanceFetcher {
    /// Create a fetcher doing network I/O on `worker`.
    ///
    /// Results are delivered on the looper of the current thread, which must have been prepared
    /// with [`crate::Looper::prepare`], otherwise [`Error::NoLooper`] is returned.
    pub fn new(
        worker: Handle,
        client: CryptoidClient,
        result_callback: Arc<dyn ResultCallback>,
    ) -> Result<Self, Error> {
        let callback = Handler::current().ok_or(Error::NoLooper)?;
        Ok(Self {
            worker,
            callback,
            client,
            result_callback,
        })
    }

    /// The handler results are posted to
    pub fn callback_handler(&self) -> &Handler {
        &self.callback
    }

    /// Schedule the query of the unspent outputs of `address` and return immediately.
    ///
    /// Exactly one of [`ResultCallback::on_result`] or [`ResultCallback::on_fail`] is later
    /// called on the creating thread. `assets` is moved to the worker and dropped there, the
    /// query does not use it. Concurrent calls are independent and deliver in any order.
    pub fn fetch<A: Send + 'static>(&self, assets: A, address: &Address) {
        let client = self.client.clone();
        let callback = self.callback.clone();
        let result_callback = self.result_callback.clone();
        let address = address.clone();

        self.worker.spawn(async move {
            let _assets = assets;
            let url = client.unspent_url(&address);

            match client.unspent(&address).await {
                Ok(utxos) => {
                    log::info!("fetched unspent outputs from {url}");
                    deliver(&callback, move || result_callback.on_result(utxos));
                }
                Err(e) => {
                    let failure = FetchFailure::from(&e);
                    match &failure {
                        FetchFailure::Http { status, message } => {
                            log::info!("got http error '{status}: {message}' from {url}")
                        }
                        FetchFailure::Io(_) => {
                            log::info!("problem querying unspent outputs from {url}: {e}")
                        }
                    }
                    deliver(&callback, move || {
                        result_callback.on_fail(failure.message_id(), &failure.args())
                    });
                }
            }
        });
    }
}

fn deliver(callback: &Handler, message: impl FnOnce() + Send + 'static) {
    if let Err(e) = callback.post(message) {
        log::warn!("dropping fetch result: {e}");
    }
}
