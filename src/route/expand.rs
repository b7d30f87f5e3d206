use crate::route::collab::{AssetKeyBuilder, DEFAULT_MIME, MimeClassifier};
use crate::route::path;
use crate::route::reply::HttpReply;

/// Implicit pretty URL candidate for a request path.
///
/// `/blog/` becomes `<project>/blog/index.html` and `/blog/post` becomes
/// `<project>/blog/post.html`. Paths with a recognised content type, and
/// `.txt` files, get nothing.
pub fn expand_route(
	classifier: &impl MimeClassifier,
	asset_key: &impl AssetKeyBuilder,
	project: &str,
	request_path: &str,
	status: u16,
) -> Option<HttpReply> {
	let fp = if request_path.is_empty() { "/" } else { request_path };

	if classifier.classify(fp) != DEFAULT_MIME {
		return None;
	}
	// Real text files share the default type but are never pages.
	if path::ext(fp) == ".txt" {
		return None;
	}

	let key = if fp.ends_with('/') {
		path::join(&[project, &path::rooted(fp), "index.html"])
	} else {
		let name = path::base(fp);
		if name == "." {
			return None;
		}
		let html = format!("{name}.html");
		path::join(&[project, &path::rooted(&path::dir(fp)), &html])
	};

	Some(HttpReply::new(asset_key.asset_key(&key), status))
}
