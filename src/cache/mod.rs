//! In-memory memo caches built on Moka.
//!
//! These sit in front of slower sources (the persisted store, the network)
//! and never own data themselves.
//!
//! ```rust
//! use phrasebook::cache::{CacheConfig, TypedCache};
//!
//! let cache: TypedCache<String, usize> = TypedCache::new("lengths", CacheConfig::default());
//! cache.insert("hello".to_string(), 5);
//! assert_eq!(cache.get(&"hello".to_string()), Some(5));
//! ```

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
