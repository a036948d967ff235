//! Shop lookup commands.

use serde::Serialize;

use inkybay_common::relay::RelayedResponse;
use inkybay_common::request_signing::{
    body_digest, canonical_string, path_and_query, RequestSigner,
};
use inkybay_common::settings::Settings;
use inkybay_common::shop::ShopQuery;

use crate::client::{InkyBayClient, Transport};
use crate::error::CliError;

/// What `sign` prints: the envelope plus the string that was signed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPreview {
    pub url: String,
    pub auth_time: u64,
    pub signature: String,
    pub body_digest: String,
    pub canonical: String,
}

/// Check that `body` is JSON while keeping its exact bytes.
pub fn parse_body(body: &str) -> Result<Vec<u8>, CliError> {
    serde_json::from_str::<serde::de::IgnoredAny>(body)
        .map_err(|e| CliError::Json(format!("Request body is not valid JSON: {}", e)))?;
    Ok(body.as_bytes().to_vec())
}

pub fn sign_preview(
    signer: &RequestSigner,
    operation: &str,
    body: &[u8],
    auth_time: Option<u64>,
) -> Result<SignPreview, CliError> {
    let envelope = match auth_time {
        Some(auth_time) => signer.sign_at(operation, body, auth_time)?,
        None => signer.sign(operation, body)?,
    };

    let url = url::Url::parse(&envelope.url)
        .map_err(|e| CliError::Signing(format!("Signed URL does not parse: {}", e)))?;
    let digest = body_digest(body);
    let canonical = canonical_string(&path_and_query(&url), envelope.auth_time, &digest);

    Ok(SignPreview {
        url: envelope.url,
        auth_time: envelope.auth_time,
        signature: envelope.signature,
        body_digest: digest,
        canonical,
    })
}

/// Sign without sending and print the result.
pub fn sign(
    settings: &Settings,
    operation: &str,
    body: &str,
    auth_time: Option<u64>,
) -> Result<(), CliError> {
    let signer = settings.request_signer()?;
    let preview = sign_preview(&signer, operation, &parse_body(body)?, auth_time)?;
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

pub fn call<T: Transport>(
    client: &InkyBayClient<T>,
    operation: &str,
    body: &str,
) -> Result<(), CliError> {
    let relayed = client.call(operation, parse_body(body)?)?;
    print_relayed(&relayed)
}

pub fn query<T: Transport>(client: &InkyBayClient<T>, query: &ShopQuery) -> Result<(), CliError> {
    let relayed = client.query(query)?;
    print_relayed(&relayed)
}

fn print_relayed(relayed: &RelayedResponse) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(relayed)?);
    if relayed.is_success() {
        Ok(())
    } else {
        Err(CliError::Upstream(relayed.status))
    }
}
