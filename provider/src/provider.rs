// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use async_trait::async_trait;
use cosmrs::proto::cosmos::auth::v1beta1::{
    query_client::QueryClient as AuthQueryClient, QueryAccountRequest,
};
use cosmrs::proto::cosmos::tx::v1beta1::{
    service_client::ServiceClient, BroadcastMode as ProtoBroadcastMode, BroadcastTxRequest,
    GetTxRequest,
};
use cosmrs::AccountId;
use tonic::transport::Channel;

use crate::error::{Error, Result};
use crate::grpc::connect;
use crate::query::{unpack_account, AccountNumbers, QueryProvider};
use crate::response::TxResponse;
use crate::tx::{BroadcastMode, TxProvider};

/// A provider that can both query the chain and submit transactions.
pub trait Provider: QueryProvider + TxProvider {}

impl<T> Provider for T where T: QueryProvider + TxProvider {}

/// [`Provider`] backed by a node's gRPC endpoint.
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Debug, Clone)]
pub struct GrpcProvider {
    channel: Channel,
}

impl GrpcProvider {
    /// Create a provider over an already open connection.
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    /// Connect to `endpoint` and create a provider over the connection.
    pub async fn connect(endpoint: &str, insecure: bool, timeout: Duration) -> Result<Self> {
        Ok(Self::new(connect(endpoint, insecure, timeout).await?))
    }

    /// Returns the underlying connection.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}

#[async_trait]
impl QueryProvider for GrpcProvider {
    async fn account_numbers(&self, address: &AccountId) -> Result<AccountNumbers> {
        let mut client = AuthQueryClient::new(self.channel.clone());
        let res = client
            .account(QueryAccountRequest {
                address: address.to_string(),
            })
            .await
            .map_err(|status| {
                Error::AccountQuery(format!(
                    "error getting account {address}: {}",
                    status.message()
                ))
            })?
            .into_inner();

        let account = res
            .account
            .ok_or_else(|| Error::AccountQuery(format!("account {address} not found")))?;
        unpack_account(&account.type_url, &account.value)
    }
}

#[async_trait]
impl TxProvider for GrpcProvider {
    async fn broadcast_tx(&self, tx_bytes: Vec<u8>, mode: BroadcastMode) -> Result<TxResponse> {
        let mut client = ServiceClient::new(self.channel.clone());
        let res = client
            .broadcast_tx(BroadcastTxRequest {
                tx_bytes,
                mode: ProtoBroadcastMode::from(mode) as i32,
            })
            .await
            .map_err(|status| Error::Broadcast(status.message().to_owned()))?
            .into_inner();

        res.tx_response
            .map(TxResponse::from)
            .ok_or_else(|| Error::Broadcast("node returned an empty response".into()))
    }

    async fn get_tx(&self, hash: &str) -> Result<Option<TxResponse>> {
        let mut client = ServiceClient::new(self.channel.clone());
        match client
            .get_tx(GetTxRequest {
                hash: hash.to_owned(),
            })
            .await
        {
            Ok(res) => Ok(res.into_inner().tx_response.map(TxResponse::from)),
            Err(status) if status.code() == tonic::Code::NotFound => Ok(None),
            Err(status) => Err(status.into()),
        }
    }
}
