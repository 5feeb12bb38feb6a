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

//! Single-slot cache for the service's current signing public key.
//!
//! The cache is an explicit object owned by whoever composes the SDK,
//! not a process-wide static, so tests can substitute a fetcher double
//! and concurrent verifiers never interfere through hidden state.

use std::future::Future;
use std::sync::Arc;

use k256::ecdsa::VerifyingKey;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Error;

/// Source of the service's current public key
///
/// The production implementation is [`crate::client::Client`], which
/// performs `GET /public-key?limit=1` and parses the first returned PEM.
pub trait KeyFetcher: Send + Sync {
	fn fetch_public_key(&self) -> impl Future<Output = Result<VerifyingKey, Error>> + Send;
}

impl<F: KeyFetcher> KeyFetcher for Arc<F> {
	fn fetch_public_key(&self) -> impl Future<Output = Result<VerifyingKey, Error>> + Send {
		(**self).fetch_public_key()
	}
}

/// Cache holding at most one server public key
///
/// The slot starts empty and is mutated only by [`refresh`](Self::refresh).
/// Concurrent refreshes are last-writer-wins; a reader always observes
/// either nothing or a fully formed key. Key rotation is rare and
/// eventually consistent, so agreement between concurrent refreshes is
/// not required.
#[derive(Clone)]
pub struct PublicKeyCache<F> {
	slot: Arc<RwLock<Option<VerifyingKey>>>,
	fetcher: F,
}

impl<F: KeyFetcher> PublicKeyCache<F> {
	pub fn new(fetcher: F) -> Self {
		Self {
			slot: Arc::new(RwLock::new(None)),
			fetcher,
		}
	}

	/// Current cached key, without I/O
	pub async fn get(&self) -> Option<VerifyingKey> {
		*self.slot.read().await
	}

	/// Fetch the service's current key and store it
	///
	/// The slot is overwritten only after a successful round-trip; a
	/// failed fetch leaves any previously cached key intact.
	pub async fn refresh(&self) -> Result<VerifyingKey, Error> {
		let key = self.fetcher.fetch_public_key().await?;
		*self.slot.write().await = Some(key);
		debug!("server public key cached");
		Ok(key)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use k256::ecdsa::SigningKey;

	use super::*;

	struct StubFetcher {
		key: Mutex<Option<VerifyingKey>>,
		fetches: AtomicUsize,
	}

	impl StubFetcher {
		fn serving(key: VerifyingKey) -> Self {
			Self {
				key: Mutex::new(Some(key)),
				fetches: AtomicUsize::new(0),
			}
		}

		fn failing() -> Self {
			Self {
				key: Mutex::new(None),
				fetches: AtomicUsize::new(0),
			}
		}
	}

	impl KeyFetcher for Arc<StubFetcher> {
		async fn fetch_public_key(&self) -> Result<VerifyingKey, Error> {
			self.fetches.fetch_add(1, Ordering::SeqCst);
			(*self.key.lock().unwrap())
				.ok_or_else(|| Error::Transport("connection refused".to_string()))
		}
	}

	fn test_key() -> VerifyingKey {
		*SigningKey::random(&mut rand::rngs::OsRng).verifying_key()
	}

	#[tokio::test]
	async fn starts_empty_and_get_does_no_io() {
		let fetcher = Arc::new(StubFetcher::serving(test_key()));
		let cache = PublicKeyCache::new(fetcher.clone());
		assert!(cache.get().await.is_none());
		assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn refresh_stores_and_returns_the_key() {
		let key = test_key();
		let fetcher = Arc::new(StubFetcher::serving(key));
		let cache = PublicKeyCache::new(fetcher.clone());

		let fetched = cache.refresh().await.unwrap();
		assert_eq!(fetched, key);
		assert_eq!(cache.get().await, Some(key));
		assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn refresh_overwrites_previous_key() {
		let first = test_key();
		let second = test_key();
		let fetcher = Arc::new(StubFetcher::serving(first));
		let cache = PublicKeyCache::new(fetcher.clone());

		cache.refresh().await.unwrap();
		*fetcher.key.lock().unwrap() = Some(second);
		cache.refresh().await.unwrap();
		assert_eq!(cache.get().await, Some(second));
	}

	#[tokio::test]
	async fn failed_refresh_keeps_prior_value() {
		let key = test_key();
		let fetcher = Arc::new(StubFetcher::serving(key));
		let cache = PublicKeyCache::new(fetcher.clone());
		cache.refresh().await.unwrap();

		*fetcher.key.lock().unwrap() = None;
		let err = cache.refresh().await.unwrap_err();
		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(cache.get().await, Some(key));
	}

	#[tokio::test]
	async fn failed_refresh_on_empty_cache_stores_nothing() {
		let fetcher = Arc::new(StubFetcher::failing());
		let cache = PublicKeyCache::new(fetcher);
		assert!(cache.refresh().await.is_err());
		assert!(cache.get().await.is_none());
	}
}
