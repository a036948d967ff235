//! HTTP client for the InkyBay shop API.
//!
//! Signing happens in [`inkybay_common::request_signing`]; this module only
//! moves the signed request over the wire and relays what comes back.

use std::time::Duration;

use inkybay_common::relay::{RelayedResponse, MAX_RESPONSE_BYTES};
use inkybay_common::request_signing::RequestSigner;
use inkybay_common::settings::Settings;
use inkybay_common::shop::ShopQuery;

use crate::error::CliError;

/// Sends a fully built request and returns the relayed reply.
pub trait Transport {
    fn send(&self, request: http::Request<Vec<u8>>) -> Result<RelayedResponse, CliError>;
}

/// Blocking transport backed by `ureq`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        // Non-2xx statuses are relayed to the caller, not raised as errors.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: http::Request<Vec<u8>>) -> Result<RelayedResponse, CliError> {
        let (parts, body) = request.into_parts();
        let request = http::Request::from_parts(parts, body.as_slice());

        let response = self.agent.run(request)?;

        let status = response.status().as_u16();
        let reader = response.into_body().into_reader();

        Ok(RelayedResponse::read_from(status, reader, MAX_RESPONSE_BYTES)?)
    }
}

pub struct InkyBayClient<T = UreqTransport> {
    signer: RequestSigner,
    api_key: String,
    transport: T,
}

impl InkyBayClient<UreqTransport> {
    pub fn from_settings(settings: &Settings) -> Result<Self, CliError> {
        Ok(Self::new(
            settings.request_signer()?,
            settings.inkybay.api_key.clone(),
            UreqTransport::new(settings.timeout()),
        ))
    }
}

impl<T: Transport> InkyBayClient<T> {
    pub fn new(signer: RequestSigner, api_key: String, transport: T) -> Self {
        Self {
            signer,
            api_key,
            transport,
        }
    }

    /// Sign `body` for `operation` and POST it.
    ///
    /// `body` is sent byte-for-byte as signed.
    pub fn call(&self, operation: &str, body: Vec<u8>) -> Result<RelayedResponse, CliError> {
        let envelope = self.signer.sign(operation, &body)?;
        log::info!("inkybay: POST {} ({} bytes)", envelope.url, body.len());
        log::debug!("inkybay: authTime={}", envelope.auth_time);

        let request = envelope.into_http_request(&self.api_key, body)?;
        let relayed = self.transport.send(request)?;

        log::info!("inkybay: {} answered with status {}", operation, relayed.status);
        Ok(relayed)
    }

    pub fn query(&self, query: &ShopQuery) -> Result<RelayedResponse, CliError> {
        let body = query.to_body()?;
        self.call(query.operation().as_str(), body)
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}
