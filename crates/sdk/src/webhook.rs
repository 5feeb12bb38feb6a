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

//! Verification of signed webhook payloads.
//!
//! Every payload delivered to a registered endpoint carries a base64
//! ECDSA signature (the `Digital-Signature` header) over the exact body
//! bytes. [`WebhookVerifier`] checks that signature against the cached
//! server public key, allowing exactly one forced cache refresh per call
//! in case the service rotated its signing key. Content is deserialized
//! strictly after verification succeeds, never before.

use tracing::debug;

use crate::cache::{KeyFetcher, PublicKeyCache};
use crate::error::Error;
use crate::signing;
use crate::types::SignatureRequest;

/// Verifier for inbound signed payloads
#[derive(Clone)]
pub struct WebhookVerifier<F> {
	cache: PublicKeyCache<F>,
}

impl<F: KeyFetcher> WebhookVerifier<F> {
	pub fn new(cache: PublicKeyCache<F>) -> Self {
		Self { cache }
	}

	/// Check a payload's signature against the server public key
	///
	/// Returns the content unchanged on success. The first attempt uses
	/// the cached key (filling the cache lazily if empty); if it fails,
	/// the cache is refreshed once — the key may have rotated — and the
	/// check is retried. A syntactically malformed signature fails
	/// immediately without any network call, and a second failure after
	/// the refresh is final: authentication failures are never retried
	/// further, so tampering cannot masquerade as a transient error.
	pub async fn verify<'a>(&self, content: &'a str, signature: &str) -> Result<&'a str, Error> {
		let signature = signing::decode_signature(signature)?;

		let key = match self.cache.get().await {
			Some(key) => key,
			None => self.cache.refresh().await?,
		};
		if signing::verify_content(&key, content, &signature) {
			return Ok(content);
		}

		debug!("cached public key rejected the signature, refreshing once");
		let key = self.cache.refresh().await?;
		if signing::verify_content(&key, content, &signature) {
			return Ok(content);
		}

		Err(Error::InvalidSignature(
			"the provided signature and content do not match the server public key".to_string(),
		))
	}

	/// Verify a payload and deserialize it into a [`SignatureRequest`]
	///
	/// `content` is the raw body received at the registered endpoint and
	/// `signature` the base64 value of the `Digital-Signature` header.
	/// Parsing happens only after [`verify`](Self::verify) succeeds.
	pub async fn parse_signature_request(
		&self,
		content: &str,
		signature: &str,
	) -> Result<SignatureRequest, Error> {
		let verified = self.verify(content, signature).await?;
		serde_json::from_str(verified)
			.map_err(|e| Error::Api(format!("failed to parse signature request: {e}")))
	}
}
