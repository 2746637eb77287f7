//! Cache provider implementations (spec §4.B ambient caching).
//!
//! | Provider | Description |
//! |----------|-------------|
//! | `MokaCacheProvider` | In-memory, single-instance cache (default) |

pub mod moka;

pub use moka::MokaCacheProvider;
