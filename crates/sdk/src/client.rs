// Copyright 2025 inkseal
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP client for the document-signing API.
//!
//! Thin transport around the crypto modules: it fetches documents,
//! submits signatures computed by [`crate::signing`], and serves as the
//! [`KeyFetcher`] behind webhook verification. All calls are plain
//! request/response; nothing here retries.

use std::time::Duration;

use k256::ecdsa::VerifyingKey;
use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::cache::{KeyFetcher, PublicKeyCache};
use crate::environment::Environment;
use crate::error::Error;
use crate::keys;
use crate::signing::SignRequest;
use crate::types::{
	Document, DocumentEnvelope, PublicKeyPage, Signature, SignatureEnvelope, SignaturePayload,
};
use crate::webhook::WebhookVerifier;

/// Default connect/read timeout for API calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the document-signing API
#[derive(Clone)]
pub struct Client {
	base_url: String,
	http: ReqwestClient,
}

impl Client {
	/// Create a client for the given environment
	pub fn new(environment: Environment) -> Self {
		Self::with_base_url(environment.base_url())
	}

	/// Create a client against an arbitrary base URL (e.g. a test server)
	pub fn with_base_url(base_url: impl Into<String>) -> Self {
		Self::with_timeout(base_url, DEFAULT_TIMEOUT)
	}

	/// Create a client with a custom request timeout
	pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
		let http = ReqwestClient::builder()
			.timeout(timeout)
			.user_agent(concat!("Rust-SDK-Sign-", env!("CARGO_PKG_VERSION")))
			.build()
			.expect("Failed to create HTTP client");

		let base_url: String = base_url.into();
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			http,
		}
	}

	/// Retrieve a specific document by id
	///
	/// `GET /document/{id}`
	pub async fn get_document(&self, id: &str) -> Result<Document, Error> {
		let url = format!("{}/document/{}", self.base_url, id);
		debug!(document_id = id, "fetching document");

		let response = self
			.http
			.get(&url)
			.send()
			.await
			.map_err(|e| Error::Transport(format!("document request failed: {e}")))?;

		let envelope: DocumentEnvelope = Self::parse_response(response).await?;
		Ok(envelope.document)
	}

	/// Add one signer's signature to a document
	///
	/// The signature is computed locally from the request's credential
	/// (exactly one of private key PEM / token), then submitted with
	/// `POST /document/{id}/signature`.
	pub async fn sign_document(&self, request: &SignRequest) -> Result<Signature, Error> {
		let payload = SignaturePayload {
			signer_id: request.signer_id.clone(),
			signature: request.signature()?,
		};

		let url = format!("{}/document/{}/signature", self.base_url, request.document_id);
		debug!(
			document_id = %request.document_id,
			signer_id = %request.signer_id,
			"submitting signature"
		);

		let response = self
			.http
			.post(&url)
			.json(&payload)
			.send()
			.await
			.map_err(|e| Error::Transport(format!("signature request failed: {e}")))?;

		let envelope: SignatureEnvelope = Self::parse_response(response).await?;
		Ok(envelope.signature)
	}

	/// Build a webhook verifier backed by this client's key endpoint
	pub fn webhook_verifier(&self) -> WebhookVerifier<Client> {
		WebhookVerifier::new(PublicKeyCache::new(self.clone()))
	}

	/// Parse a successful JSON response or map the HTTP status class
	/// onto the corresponding error kind.
	async fn parse_response<T: serde::de::DeserializeOwned>(
		response: reqwest::Response,
	) -> Result<T, Error> {
		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(match status.as_u16() {
				400 => Error::Input(body),
				500 => Error::InternalServer(body),
				_ => Error::Unknown(format!("{status}: {body}")),
			});
		}
		response
			.json::<T>()
			.await
			.map_err(|e| Error::Api(format!("failed to parse response: {e}")))
	}
}

impl KeyFetcher for Client {
	/// Fetch the service's current signing public key
	///
	/// `GET /public-key?limit=1`; only the first returned key is used.
	async fn fetch_public_key(&self) -> Result<VerifyingKey, Error> {
		let url = format!("{}/public-key?limit=1", self.base_url);
		debug!("fetching server public key");

		let response = self
			.http
			.get(&url)
			.send()
			.await
			.map_err(|e| Error::Transport(format!("public key request failed: {e}")))?;

		let page: PublicKeyPage = Self::parse_response(response).await?;
		let entry = page
			.public_keys
			.first()
			.ok_or_else(|| Error::Api("public key response contained no keys".to_string()))?;
		keys::public_key_from_pem(&entry.content)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn environment_selects_base_url() {
		let client = Client::new(Environment::Sandbox);
		assert_eq!(client.base_url, Environment::Sandbox.base_url());
	}

	#[test]
	fn trailing_slash_is_trimmed() {
		let client = Client::with_base_url("http://localhost:8080/");
		assert_eq!(client.base_url, "http://localhost:8080");
	}
}
