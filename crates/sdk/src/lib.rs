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

//! Ink Seal SDK - Client library for the document-signing API
//!
//! This crate provides typed access to documents and their signatures,
//! ECDSA signing of document content (secp256k1), and verification of
//! the signed webhooks the service sends to registered endpoints.
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No runtime initialization
//! - No environment or configuration loading
//!
//! # Quick start
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), inkseal_sdk::Error> {
//! use inkseal_sdk::{Client, Environment, SignRequest};
//!
//! let client = Client::new(Environment::Sandbox);
//!
//! // Verify an inbound webhook before trusting its payload. `content`
//! // is the raw request body; `signature` comes from the
//! // Digital-Signature header.
//! # let (content, signature) = ("", "");
//! let verifier = client.webhook_verifier();
//! let request = verifier.parse_signature_request(content, signature).await?;
//!
//! // Fetch the document and sign it with the delivered private key.
//! let document = client.get_document(&request.document_id).await?;
//! let signature = client
//! 	.sign_document(&SignRequest {
//! 		document_id: document.id.clone(),
//! 		content: document.content.clone(),
//! 		signer_id: request.signer_id.clone(),
//! 		private_key: Some(request.private_key.clone()),
//! 		token: None,
//! 	})
//! 	.await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod environment;
pub mod error;
pub mod keys;
pub mod signing;
pub mod types;
pub mod webhook;

pub use cache::{KeyFetcher, PublicKeyCache};
pub use client::Client;
pub use environment::Environment;
pub use error::Error;
pub use signing::SignRequest;
pub use types::*;
pub use webhook::WebhookVerifier;
