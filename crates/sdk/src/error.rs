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

use thiserror::Error as ThisError;

/// Error types for SDK operations
///
/// All failures surface synchronously to the immediate caller. The only
/// built-in recovery anywhere in the SDK is the single forced public-key
/// refresh inside webhook verification; nothing else is retried.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Malformed PEM content for a private or public key
	#[error("Invalid key: {0}")]
	KeyParse(String),

	/// Signature blob is malformed, or the signature does not verify
	/// against either the cached or the refreshed server public key
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),

	/// Network/HTTP failure reaching the service
	#[error("Transport error: {0}")]
	Transport(String),

	/// Caller-supplied input violated the SDK contract before any
	/// network or crypto operation took place
	#[error("Validation error: {0}")]
	Validation(String),

	/// Service rejected the request payload (HTTP 400)
	#[error("Input error: {0}")]
	Input(String),

	/// Service failed internally (HTTP 500)
	#[error("Internal server error: {0}")]
	InternalServer(String),

	/// Unexpected HTTP status outside the documented classes
	#[error("Unknown error: {0}")]
	Unknown(String),

	/// Service responded with a body the SDK could not interpret
	#[error("Invalid response: {0}")]
	Api(String),
}
