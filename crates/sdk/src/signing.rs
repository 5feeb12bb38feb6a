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

//! ECDSA signing of document content.
//!
//! Signatures are computed over the SHA-256 digest of the raw UTF-8
//! content bytes, DER-encoded, and transmitted as standard base64. No
//! I/O happens here; transport belongs to [`crate::client`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};

use crate::error::Error;
use crate::keys;

/// Sign content with the given private key
///
/// Returns the base64 of the DER-encoded ECDSA signature. Signing is
/// deterministic (RFC 6979 nonces), so identical key and content always
/// produce the identical signature string.
pub fn sign_content(content: &str, key: &SigningKey) -> String {
	let signature: EcdsaSignature = key.sign(content.as_bytes());
	BASE64.encode(signature.to_der())
}

/// Check a parsed signature against content and a public key
pub fn verify_content(key: &VerifyingKey, content: &str, signature: &EcdsaSignature) -> bool {
	key.verify(content.as_bytes(), signature).is_ok()
}

/// Decode a base64 DER ECDSA signature string
///
/// Purely syntactic; a failure here means the blob is malformed and no
/// verification (or network call) should be attempted.
pub fn decode_signature(signature_b64: &str) -> Result<EcdsaSignature, Error> {
	let der = BASE64
		.decode(signature_b64.trim())
		.map_err(|e| Error::InvalidSignature(format!("invalid base64 signature: {e}")))?;
	EcdsaSignature::from_der(&der)
		.map_err(|e| Error::InvalidSignature(format!("invalid DER signature: {e}")))
}

/// Which credential a [`SignRequest`] carries
pub(crate) enum Credential<'a> {
	/// Private key PEM received on a registered webhook endpoint
	/// ("server" signers)
	PrivateKeyPem(&'a str),
	/// Token received via email, SMS, etc. ("token" signers)
	Token(&'a str),
}

/// Everything needed to add one signer's signature to a document
///
/// Exactly one of `private_key` / `token` must be supplied; anything
/// else fails with [`Error::Validation`] before any crypto or network
/// operation runs.
#[derive(Debug, Clone)]
pub struct SignRequest {
	/// Id of the document being signed
	pub document_id: String,
	/// HTML content of the document being signed
	pub content: String,
	/// Id of the signer creating the signature
	pub signer_id: String,
	/// Private key PEM, for "server" signatures
	pub private_key: Option<String>,
	/// Shared token, for "token" signatures
	pub token: Option<String>,
}

impl SignRequest {
	pub(crate) fn credential(&self) -> Result<Credential<'_>, Error> {
		match (self.private_key.as_deref(), self.token.as_deref()) {
			(Some(pem), None) => Ok(Credential::PrivateKeyPem(pem)),
			(None, Some(token)) => Ok(Credential::Token(token)),
			(Some(_), Some(_)) => Err(Error::Validation(
				"supply either privateKey or token, not both".to_string(),
			)),
			(None, None) => Err(Error::Validation(
				"either privateKey or token must be supplied".to_string(),
			)),
		}
	}

	/// Build the signing key for this request's credential
	pub fn signing_key(&self) -> Result<SigningKey, Error> {
		match self.credential()? {
			Credential::PrivateKeyPem(pem) => keys::private_key_from_pem(pem),
			Credential::Token(token) => {
				keys::derive_private_key(&self.document_id, &self.signer_id, token)
			}
		}
	}

	/// Compute the base64 signature over this request's content
	pub fn signature(&self) -> Result<String, Error> {
		Ok(sign_content(&self.content, &self.signing_key()?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn request(private_key: Option<&str>, token: Option<&str>) -> SignRequest {
		SignRequest {
			document_id: "d186044b38be41598aaccfc5770b991a".to_string(),
			content: "<html>sign me</html>".to_string(),
			signer_id: "6785678567856785".to_string(),
			private_key: private_key.map(str::to_string),
			token: token.map(str::to_string),
		}
	}

	#[test]
	fn sign_verify_roundtrip() {
		let key = SigningKey::random(&mut rand::rngs::OsRng);
		let content = "hello-doc";
		let b64 = sign_content(content, &key);
		let signature = decode_signature(&b64).unwrap();
		assert!(verify_content(key.verifying_key(), content, &signature));
	}

	#[test]
	fn tampered_content_fails_verification() {
		let key = SigningKey::random(&mut rand::rngs::OsRng);
		let b64 = sign_content("hello-doc", &key);
		let signature = decode_signature(&b64).unwrap();
		assert!(!verify_content(key.verifying_key(), "hello-dod", &signature));
	}

	#[test]
	fn signing_is_deterministic() {
		let key = SigningKey::random(&mut rand::rngs::OsRng);
		assert_eq!(sign_content("hello-doc", &key), sign_content("hello-doc", &key));
	}

	#[test]
	fn decode_rejects_bad_base64() {
		let err = decode_signature("!!!not-base64!!!").unwrap_err();
		assert!(matches!(err, Error::InvalidSignature(_)));
	}

	#[test]
	fn decode_rejects_non_der_bytes() {
		let err = decode_signature(&BASE64.encode(b"not a der signature")).unwrap_err();
		assert!(matches!(err, Error::InvalidSignature(_)));
	}

	#[test]
	fn requires_exactly_one_credential() {
		let err = request(None, None).signature().unwrap_err();
		assert!(matches!(err, Error::Validation(_)));

		let err = request(Some("pem"), Some("tok")).signature().unwrap_err();
		assert!(matches!(err, Error::Validation(_)));
	}

	#[test]
	fn token_request_signs_with_derived_key() {
		let req = request(None, Some("tok123"));
		let b64 = req.signature().unwrap();
		let derived = crate::keys::derive_private_key(
			&req.document_id,
			&req.signer_id,
			"tok123",
		)
		.unwrap();
		let signature = decode_signature(&b64).unwrap();
		assert!(verify_content(derived.verifying_key(), &req.content, &signature));
	}

	#[test]
	fn token_signatures_are_reproducible() {
		let first = request(None, Some("tok123")).signature().unwrap();
		let second = request(None, Some("tok123")).signature().unwrap();
		assert_eq!(first, second);
	}
}
