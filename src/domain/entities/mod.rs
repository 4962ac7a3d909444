//! Domain Entities
//!
//! - `PublisherEntry` / `Descriptor` - parsed catalog contents
//! - `CacheState` - what the local cache currently holds and how it is refreshed
//! - `AppProfile` - the application the cache belongs to

mod app_profile;
mod cache_state;
mod descriptor;

pub use app_profile::AppProfile;
pub use cache_state::CacheState;
pub use descriptor::{Descriptor, DescriptorWarning, PublisherEntry};
