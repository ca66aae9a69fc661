//! Concurrent place search: providers, recents, and the orchestrating
//! manager.

pub mod bundle;
pub mod manager;
pub mod merge;
pub mod provider;
pub mod providers;
pub mod recents;
pub mod types;

pub use bundle::{ProviderResponse, SearchBundle};
pub use manager::{SearchManager, SearchManagerBuilder};
pub use provider::{Provider, ProviderError};
pub use providers::{AddressesProvider, GridRefProvider, LatLonProvider, OpennamesProvider};
pub use recents::{MemoryRecentsManager, RecentsManager};
pub use types::{Envelope, Point, SearchResult, SpatialReference};
