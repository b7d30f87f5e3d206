//! Request path resolution.
//!
//! This module handles:
//! - Ordering candidate replies for a request path
//! - Implicit pretty URL expansion
//! - The MIME and storage-key collaborators used along the way

pub mod collab;
pub mod expand;
pub mod path;
pub mod reply;
pub mod resolver;

pub use collab::{AssetKeyBuilder, DEFAULT_MIME, GuessMime, MimeClassifier, PlainAssetKey};
pub use expand::expand_route;
pub use reply::{HttpReply, is_redirect_status};
pub use resolver::{Hop, RouteResolver, calc_routes};
