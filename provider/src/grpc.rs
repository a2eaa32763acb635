// Copyright 2025 Nibi SDK Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::error::{Error, Result};

/// Open a gRPC connection to a node.
///
/// `endpoint` may be given without a scheme (`localhost:9090`), in which case
/// `http` is used for insecure connections and `https` otherwise. An explicit
/// scheme must agree with `insecure`. Resolves once the connection is
/// established, or fails after `timeout`.
pub async fn connect(endpoint: &str, insecure: bool, timeout: Duration) -> Result<Channel> {
    let uri = endpoint_uri(endpoint, insecure)?;
    let mut endpoint = Endpoint::from_shared(uri.clone())
        .map_err(|e| Error::Connection(format!("invalid endpoint '{uri}': {e}")))?
        .connect_timeout(timeout);
    if !insecure {
        endpoint = endpoint
            .tls_config(ClientTlsConfig::new().with_native_roots())
            .map_err(|e| Error::Connection(format!("invalid tls config for '{uri}': {e}")))?;
    }

    match tokio::time::timeout(timeout, endpoint.connect()).await {
        Ok(Ok(channel)) => {
            tracing::debug!(uri = %uri, insecure, "Connected to gRPC endpoint");
            Ok(channel)
        }
        Ok(Err(e)) => Err(Error::Connection(format!(
            "failed to connect to '{uri}': {e}"
        ))),
        Err(_) => Err(Error::Connection(format!(
            "timed out after {timeout:?} connecting to '{uri}'"
        ))),
    }
}

fn endpoint_uri(endpoint: &str, insecure: bool) -> Result<String> {
    let expected = if insecure { "http" } else { "https" };
    match endpoint.split_once("://") {
        None => Ok(format!("{expected}://{endpoint}")),
        Some((scheme, _)) if scheme.eq_ignore_ascii_case(expected) => Ok(endpoint.to_owned()),
        Some((scheme, _)) => Err(Error::Connection(format!(
            "endpoint '{endpoint}' uses scheme '{scheme}' but {} was requested",
            if insecure { "an insecure connection" } else { "tls" }
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uri() {
        assert_eq!(
            endpoint_uri("localhost:9090", true).unwrap(),
            "http://localhost:9090"
        );
        assert_eq!(
            endpoint_uri("grpc.nibiru.fi:443", false).unwrap(),
            "https://grpc.nibiru.fi:443"
        );
        assert_eq!(
            endpoint_uri("https://grpc.nibiru.fi:443", false).unwrap(),
            "https://grpc.nibiru.fi:443"
        );
        assert_eq!(
            endpoint_uri("http://localhost:9090", true).unwrap(),
            "http://localhost:9090"
        );
    }

    #[test]
    fn test_endpoint_scheme_mismatch() {
        assert!(matches!(
            endpoint_uri("https://grpc.nibiru.fi:443", true),
            Err(Error::Connection(_))
        ));
        assert!(matches!(
            endpoint_uri("http://localhost:9090", false),
            Err(Error::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_scheme_mismatch() {
        let err = connect("https://127.0.0.1:9", true, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("scheme 'https'"));
    }

    #[tokio::test]
    async fn test_connect_invalid_endpoint() {
        let err = connect("not a uri", true, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Nothing listens on the discard port.
        let err = connect("127.0.0.1:9", true, Duration::from_millis(500))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }
}
