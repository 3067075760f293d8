//! Read-only contract call transport
//!
//! Quoters never talk to a node directly; they hand calldata to a [`CallBackend`]. The
//! production implementation is a `web3` HTTP client, tests plug in canned replies.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dex::Codec;
use ethereum_types::H160;
use std::time::Duration;
use web3::{
    transports::Http,
    types::{Bytes, CallRequest},
    Web3,
};

/// Executes `eth_call` against the latest block
#[async_trait]
pub trait CallBackend: Send + Sync {
    async fn call(&self, to: H160, data: Vec<u8>) -> Result<Vec<u8>>;
}

/// `eth_call` over JSON-RPC HTTP with a per-call deadline
pub struct Web3CallBackend {
    web3: Web3<Http>,
    timeout: Duration,
}

impl Web3CallBackend {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let transport =
            Http::new(rpc_url).with_context(|| format!("Invalid RPC URL: {}", rpc_url))?;
        Ok(Self {
            web3: Web3::new(transport),
            timeout,
        })
    }
}

#[async_trait]
impl CallBackend for Web3CallBackend {
    async fn call(&self, to: H160, data: Vec<u8>) -> Result<Vec<u8>> {
        let request = CallRequest {
            to: Some(to),
            data: Some(Bytes(data)),
            ..Default::default()
        };

        let reply = tokio::time::timeout(self.timeout, self.web3.eth().call(request, None))
            .await
            .with_context(|| format!("eth_call to {:?} timed out after {:?}", to, self.timeout))?
            .with_context(|| format!("eth_call to {:?} failed", to))?;

        crate::log_network!("eth_call {:?} -> {} bytes", to, reply.0.len());
        Ok(reply.0)
    }
}

/// Encode, call and decode one typed read
pub async fn call_typed<C>(
    backend: &dyn CallBackend,
    to: H160,
    request: &C::Request,
) -> Result<C::Response>
where
    C: Codec,
    C::Request: Sync,
{
    let calldata = C::encode_request(request)?;
    let reply = backend.call(to, calldata).await?;
    Ok(C::decode_response(&reply)?)
}
