use crate::route::collab::{AssetKeyBuilder, GuessMime, MimeClassifier, PlainAssetKey};
use crate::route::expand::expand_route;
use crate::route::path;
use crate::route::reply::{HttpReply, is_redirect_status};
use crate::rules::RuleSet;

/// Where a resolution sits in the rewrite chain.
///
/// User rules are only consulted on the initial hop, so an internal rewrite
/// is followed at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
	Initial,
	Rewritten,
}

/// Turns a request path into an ordered list of candidate replies.
///
/// Candidates run from most to least specific: the literal asset, the pretty
/// URL, the matching user rule, a trailing-slash redirect, then `404.html`.
/// The caller tries each in turn until one succeeds.
#[derive(Debug, Clone, Default)]
pub struct RouteResolver<C = GuessMime, K = PlainAssetKey> {
	classifier: C,
	asset_key: K,
}

impl RouteResolver {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<C: MimeClassifier, K: AssetKeyBuilder> RouteResolver<C, K> {
	pub fn with_collaborators(classifier: C, asset_key: K) -> Self {
		Self {
			classifier,
			asset_key,
		}
	}

	/// Resolve `request_path` within `project` against `rules`.
	pub fn calc_routes(&self, project: &str, request_path: &str, rules: &RuleSet) -> Vec<HttpReply> {
		let routes = self.resolve(project, request_path, rules, Hop::Initial);
		tracing::trace!(project, path = request_path, ?routes, "resolved candidates");
		routes
	}

	/// Pretty URL candidate for `request_path`, if any.
	pub fn expand_route(&self, project: &str, request_path: &str, status: u16) -> Option<HttpReply> {
		expand_route(&self.classifier, &self.asset_key, project, request_path, status)
	}

	/// Resolve at a given point in the rewrite chain.
	///
	/// At `Hop::Rewritten` the rules are never consulted, so a rewrite target
	/// cannot trigger another rewrite.
	pub fn resolve(&self, project: &str, fp: &str, rules: &RuleSet, hop: Hop) -> Vec<HttpReply> {
		let mut routes = Vec::new();
		let is_file = !fp.is_empty() && !fp.ends_with('/');

		// the path as-is
		if is_file {
			let key = path::join(&[project, &path::rooted(fp)]);
			routes.push(HttpReply::new(self.asset_key.asset_key(&key), 200));
		}

		routes.extend(self.expand_route(project, fp, 200));

		if hop == Hop::Initial
			&& let Some(matched) = rules.find_match(fp)
		{
			let rule = &matched.rule.rule;
			let dest = matched.destination();

			if !is_redirect_status(rule.status) && !has_scheme(&dest) {
				tracing::debug!(project, from = fp, to = %dest, "internal rewrite");
				routes.extend(self.resolve(project, &dest, rules, Hop::Rewritten));
				return routes;
			}

			tracing::debug!(project, from = fp, to = %dest, status = rule.status, "redirect rule matched");
			let reply = (!dest.is_empty()).then(|| HttpReply {
				filepath: dest,
				status: rule.status,
				query: (!rule.query.is_empty()).then(|| rule.query.clone()),
			});

			if rule.force {
				routes = reply.into_iter().collect();
			} else {
				routes.extend(reply);
			}
		}

		// might be a directory missing its trailing slash
		if is_file {
			routes.push(HttpReply::new(format!("{fp}/"), 301));
		}

		routes.push(HttpReply::new(path::join(&[project, "404.html"]), 404));
		routes
	}
}

/// Resolve with the default collaborators.
pub fn calc_routes(project: &str, request_path: &str, rules: &RuleSet) -> Vec<HttpReply> {
	RouteResolver::new().calc_routes(project, request_path, rules)
}

/// `true` when `dest` is an absolute URL pointing at some host.
///
/// `page:1` parses with a scheme but has no host, so it stays a site path.
fn has_scheme(dest: &str) -> bool {
	url::Url::parse(dest).is_ok_and(|u| u.has_host())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::RedirectRule;

	fn routes(path: &str, rules: &[RedirectRule]) -> Vec<HttpReply> {
		calc_routes("site", path, &RuleSet::compile(rules))
	}

	#[test]
	fn test_has_scheme() {
		assert!(has_scheme("https://example.com/x"));
		assert!(has_scheme("http://example.com"));
		assert!(!has_scheme("/local/path"));
		assert!(!has_scheme("relative/path"));
		assert!(!has_scheme(""));
		assert!(!has_scheme("notes:2"));
		assert!(!has_scheme("mailto:hi@example.com"));
	}

	#[test]
	fn test_colon_in_relative_destination_rewrites_internally() {
		let rules = vec![RedirectRule::new("/p/:n", "notes::n", 200)];
		let out = routes("/p/2", &rules);
		assert_eq!(&out[..2], &routes("/p/2", &[])[..2]);
		assert_eq!(&out[2..], routes("notes:2", &[]).as_slice());
		assert_eq!(out[2], HttpReply::new("site/notes:2", 200));
	}

	#[test]
	fn test_plain_file_no_rules() {
		assert_eq!(
			routes("/blog/post", &[]),
			vec![
				HttpReply::new("site/blog/post", 200),
				HttpReply::new("site/blog/post.html", 200),
				HttpReply::new("/blog/post/", 301),
				HttpReply::new("site/404.html", 404),
			]
		);
	}

	#[test]
	fn test_directory_no_rules() {
		assert_eq!(
			routes("/blog/", &[]),
			vec![
				HttpReply::new("site/blog/index.html", 200),
				HttpReply::new("site/404.html", 404),
			]
		);
	}

	#[test]
	fn test_root_no_rules() {
		assert_eq!(
			routes("", &[]),
			vec![
				HttpReply::new("site/index.html", 200),
				HttpReply::new("site/404.html", 404),
			]
		);
	}

	#[test]
	fn test_asset_with_known_type() {
		assert_eq!(
			routes("/css/site.css", &[]),
			vec![
				HttpReply::new("site/css/site.css", 200),
				HttpReply::new("/css/site.css/", 301),
				HttpReply::new("site/404.html", 404),
			]
		);
	}

	#[test]
	fn test_redirect_rule_placement() {
		let rules = vec![RedirectRule::new("/old/*", "/new/:splat", 301)];
		assert_eq!(
			routes("/old/foo/bar", &rules),
			vec![
				HttpReply::new("site/old/foo/bar", 200),
				HttpReply::new("site/old/foo/bar.html", 200),
				HttpReply::new("/new/foo/bar", 301),
				HttpReply::new("/old/foo/bar/", 301),
				HttpReply::new("site/404.html", 404),
			]
		);
	}

	#[test]
	fn test_redirect_carries_query() {
		let rules = vec![RedirectRule::new("/promo", "/sale", 302).with_query("ref", "promo")];
		let out = routes("/promo", &rules);
		let reply = &out[2];
		assert_eq!(reply.filepath, "/sale");
		assert_eq!(reply.status, 302);
		assert_eq!(reply.location(), "/sale?ref=promo");
	}

	#[test]
	fn test_forced_rule_replaces_candidates() {
		let rules = vec![RedirectRule::new("/old", "/new", 301).forced()];
		assert_eq!(
			routes("/old", &rules),
			vec![
				HttpReply::new("/new", 301),
				HttpReply::new("/old/", 301),
				HttpReply::new("site/404.html", 404),
			]
		);
	}

	#[test]
	fn test_internal_rewrite_single_hop() {
		let rules = vec![
			RedirectRule::new("/a", "/b", 200),
			RedirectRule::new("/b", "/c", 200),
		];
		assert_eq!(
			routes("/a", &rules),
			vec![
				HttpReply::new("site/a", 200),
				HttpReply::new("site/a.html", 200),
				HttpReply::new("site/b", 200),
				HttpReply::new("site/b.html", 200),
				HttpReply::new("/b/", 301),
				HttpReply::new("site/404.html", 404),
			]
		);
	}

	#[test]
	fn test_rewrite_to_external_url_is_a_candidate() {
		let rules = vec![RedirectRule::new("/api/*", "https://api.example.com/:splat", 200)];
		let out = routes("/api/v1/users", &rules);
		assert_eq!(out[2], HttpReply::new("https://api.example.com/v1/users", 200));
		assert_eq!(out.len(), 5);
	}

	#[test]
	fn test_redirect_to_external_url() {
		let rules = vec![RedirectRule::new("/docs/*", "https://docs.example.com/:splat", 302)];
		let out = routes("/docs/intro", &rules);
		assert_eq!(out[2], HttpReply::new("https://docs.example.com/intro", 302));
	}

	#[test]
	fn test_self_redirect_ignored() {
		let rules = vec![RedirectRule::new("/loop", "/loop", 301)];
		assert_eq!(routes("/loop", &rules), routes("/loop", &[]));
	}

	#[test]
	fn test_malformed_rule_does_not_block_later_rules() {
		let rules = vec![
			RedirectRule::new("/a/*/b", "/never", 301),
			RedirectRule::new("/a/*", "/later/:splat", 301),
		];
		let out = routes("/a/x/b", &rules);
		assert_eq!(out[2], HttpReply::new("/later/x/b", 301));
	}

	#[test]
	fn test_empty_destination_adds_nothing() {
		let rules = vec![RedirectRule::new("/gone/*", ":splat", 301)];
		assert_eq!(routes("/gone/", &rules), routes("/gone/", &[]));
	}

	#[test]
	fn test_rewritten_hop_ignores_rules() {
		let resolver = RouteResolver::new();
		let set = RuleSet::compile(&[RedirectRule::new("/a", "/elsewhere", 301)]);
		assert_eq!(
			resolver.resolve("site", "/a", &set, Hop::Rewritten),
			resolver.calc_routes("site", "/a", &RuleSet::empty()),
		);
	}

	#[test]
	fn test_custom_classifier() {
		let resolver =
			RouteResolver::with_collaborators(|_: &str| "text/html".to_string(), PlainAssetKey);
		assert_eq!(
			resolver.calc_routes("site", "/about", &RuleSet::empty()),
			vec![
				HttpReply::new("site/about", 200),
				HttpReply::new("/about/", 301),
				HttpReply::new("site/404.html", 404),
			]
		);
	}
}
