use std::collections::HashSet;

use bwk_common::{Address, Utxo};
use reqwest::header::{ACCEPT_CHARSET, CACHE_CONTROL};
use url::Url;

use crate::clients::parse_unspent;
use crate::Error;

/// A builder for the [`CryptoidClient`]
#[derive(Debug, Clone)]
pub struct CryptoidClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Option<u8>,
}

impl CryptoidClientBuilder {
    /// Create a builder for the API at `base_url` (eg. [`crate::BITCORE_CRYPTOID_URL`])
    /// authenticating with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            timeout: None,
        }
    }

    /// Set the timeout for HTTP requests in seconds, by default the HTTP client has no timeout
    pub fn timeout(mut self, timeout: u8) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the async client
    pub fn build(self) -> Result<CryptoidClient, Error> {
        let base_url = Url::parse(&self.base_url)?;

        let builder = reqwest::Client::builder();
        let builder = match self.timeout {
            Some(timeout) => builder.timeout(std::time::Duration::from_secs(timeout as u64)),
            None => builder,
        };
        let client = builder.build()?;

        Ok(CryptoidClient {
            client,
            base_url,
            api_key: self.api_key,
        })
    }
}

/// A client of the cryptoid block explorer API
///
/// Cloning is cheap, clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CryptoidClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl CryptoidClient {
    /// Create a client with default settings
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        CryptoidClientBuilder::new(base_url, api_key).build()
    }

    // example:
    // https://chainz.cryptoid.info/btx/api.dws?q=unspent&key=<key>&active=2N2oLLYFCwfH81SUReTcuhtoEHgwHYHQNq
    pub fn unspent_url(&self, address: &Address) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", "unspent")
            .append_pair("key", &self.api_key)
            .append_pair("active", &address.to_base58());
        url
    }

    /// Returns the unspent outputs of `address`
    ///
    /// A response with a non-2xx status is returned as [`Error::Http`].
    pub async fn unspent(&self, address: &Address) -> Result<HashSet<Utxo>, Error> {
        let url = self.unspent_url(address);
        log::debug!("trying to request wallet balance from {url}");

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(ACCEPT_CHARSET, "utf-8")
            .send()
            .await?;

        let status = response.status();
        let level = if status.is_success() {
            log::Level::Trace
        } else {
            log::Level::Info
        };
        log::log!(
            level,
            "{} status_code:{} - body bytes:{:?}",
            &url,
            status,
            response.content_length(),
        );

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: reason_phrase(&response),
            });
        }

        // going through string and then json to log the body on parse errors
        let text = response.text().await?;
        parse_unspent(&text, address)
    }
}

/// Reason phrase sent by the server, hyper keeps it only when it is not the canonical one
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use bwk_common::Network;

    use super::*;

    fn address() -> Address {
        Address::parse("2N2oLLYFCwfH81SUReTcuhtoEHgwHYHQNq", Network::Bitcore).unwrap()
    }

    #[test]
    fn unspent_url() {
        let client = CryptoidClient::new(crate::BITCORE_CRYPTOID_URL, "secret").unwrap();
        assert_eq!(
            client.unspent_url(&address()).as_str(),
            "https://chainz.cryptoid.info/btx/api.dws?q=unspent&key=secret&active=2N2oLLYFCwfH81SUReTcuhtoEHgwHYHQNq"
        );
    }

    #[test]
    fn unspent_url_keeps_existing_query() {
        let client = CryptoidClient::new("http://127.0.0.1:3000/api.dws?x=1", "k y").unwrap();
        assert_eq!(
            client.unspent_url(&address()).as_str(),
            "http://127.0.0.1:3000/api.dws?x=1&q=unspent&key=k+y&active=2N2oLLYFCwfH81SUReTcuhtoEHgwHYHQNq"
        );
    }

    #[test]
    fn invalid_base_url() {
        let err = CryptoidClientBuilder::new("not a url", "key")
            .timeout(5)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }
}
