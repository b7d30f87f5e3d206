//! Collaborators the resolver consults but does not own.

/// Content type reported for extensionless or unrecognised paths.
///
/// Only paths classified with this value are candidates for pretty URL
/// expansion.
pub const DEFAULT_MIME: &str = "text/plain";

/// Classifies a request path by content type.
pub trait MimeClassifier {
	fn classify(&self, path: &str) -> String;
}

/// Extension-based classification backed by `mime_guess`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessMime;

impl MimeClassifier for GuessMime {
	fn classify(&self, path: &str) -> String {
		mime_guess::from_path(path)
			.first_raw()
			.unwrap_or(DEFAULT_MIME)
			.to_string()
	}
}

/// Turns a logical asset path into a storage key.
pub trait AssetKeyBuilder {
	fn asset_key(&self, raw_path: &str) -> String;
}

/// Uses the logical path as the storage key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAssetKey;

impl AssetKeyBuilder for PlainAssetKey {
	fn asset_key(&self, raw_path: &str) -> String {
		raw_path.to_string()
	}
}

impl<F> MimeClassifier for F
where
	F: Fn(&str) -> String,
{
	fn classify(&self, path: &str) -> String {
		self(path)
	}
}
