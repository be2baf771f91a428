//! Fragment discovery.
//!
//! Walks a fragment root and yields every fragment file together with the
//! component it belongs to.

pub mod types;
pub mod walker;

pub use types::{
    DiscoveryError,
    FragmentFile,
};
pub use walker::find_fragments;
