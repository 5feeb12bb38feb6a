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

/// Base URL of the production API (version pinned to v2)
pub const PRODUCTION_BASE_URL: &str = "https://api.inkseal.com/v2";

/// Base URL of the sandbox API (version pinned to v2)
pub const SANDBOX_BASE_URL: &str = "https://sandbox.api.inkseal.com/v2";

/// Target environment for API calls
///
/// Selected explicitly at client construction; the SDK never reads
/// environment variables or configuration files on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
	Production,
	Sandbox,
}

impl Environment {
	/// Versioned base URL for this environment
	pub fn base_url(&self) -> &'static str {
		match self {
			Environment::Production => PRODUCTION_BASE_URL,
			Environment::Sandbox => SANDBOX_BASE_URL,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_urls_are_versioned() {
		assert!(Environment::Production.base_url().ends_with("/v2"));
		assert!(Environment::Sandbox.base_url().ends_with("/v2"));
		assert_ne!(
			Environment::Production.base_url(),
			Environment::Sandbox.base_url()
		);
	}
}
