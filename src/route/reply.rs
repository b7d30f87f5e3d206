use std::collections::BTreeMap;
use std::fmt;

/// `true` for 3xx statuses.
pub fn is_redirect_status(status: u16) -> bool {
	(300..=399).contains(&status)
}

/// One candidate outcome for a request.
///
/// A redirect candidate (3xx) carries the location to send the client to.
/// Any other status carries a storage key to read and serve with that status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
	pub filepath: String,
	pub status: u16,
	pub query: Option<BTreeMap<String, String>>,
}

impl HttpReply {
	/// A candidate without query parameters.
	pub fn new(filepath: impl Into<String>, status: u16) -> Self {
		Self {
			filepath: filepath.into(),
			status,
			query: None,
		}
	}

	pub fn is_redirect(&self) -> bool {
		is_redirect_status(self.status)
	}

	/// The target with any query parameters appended.
	pub fn location(&self) -> String {
		let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) else {
			return self.filepath.clone();
		};

		let encoded = url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(query.iter())
			.finish();
		let sep = if self.filepath.contains('?') { '&' } else { '?' };
		format!("{}{sep}{encoded}", self.filepath)
	}
}

impl fmt::Display for HttpReply {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.status, self.location())
	}
}
