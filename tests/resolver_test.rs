use siteroute::config::{RedirectRule, parse_redirects_str};
use siteroute::route::{Hop, HttpReply, RouteResolver, calc_routes};
use siteroute::rules::{RuleCache, RuleSet};
use std::sync::Arc;
use std::thread;

const PROJECT: &str = "my-site";

fn resolve(path: &str, rules: &[RedirectRule]) -> Vec<HttpReply> {
	calc_routes(PROJECT, path, &RuleSet::compile(rules))
}

fn not_found() -> HttpReply {
	HttpReply::new("my-site/404.html", 404)
}

fn sample_rules() -> Vec<RedirectRule> {
	parse_redirects_str(
		r#"
/old/*            /new/:splat                 301
/blog/:year/:slug /posts/:slug                302
/app/*            /app/index.html             200
/promo ref=home   /sale                       302!
/docs/*           https://docs.example.com/:splat 301
"#,
	)
	.unwrap()
}

const SAMPLE_PATHS: &[&str] = &[
	"",
	"/",
	"/about",
	"/blog/",
	"/blog/2024/hello",
	"/old/foo/bar",
	"/app/settings",
	"/promo",
	"/docs/intro",
	"/style.css",
	"/notes.txt",
];

#[test]
fn test_literal_candidate_comes_first() {
	let rules = sample_rules();
	for path in SAMPLE_PATHS {
		if path.is_empty() || path.ends_with('/') || *path == "/promo" {
			continue;
		}
		let first = resolve(path, &rules).remove(0);
		assert_eq!(first, HttpReply::new(format!("my-site{path}"), 200), "path {path:?}");
	}
}

#[test]
fn test_not_found_is_always_last() {
	let rules = sample_rules();
	for path in SAMPLE_PATHS {
		assert_eq!(resolve(path, &rules).last(), Some(&not_found()), "path {path:?}");
		assert_eq!(resolve(path, &[]).last(), Some(&not_found()), "path {path:?}");
	}
}

#[test]
fn test_self_redirect_never_matches() {
	let rules = vec![
		RedirectRule::new("/:page", "/:page", 301),
		RedirectRule::new("/*", "/*", 301),
	];
	for path in SAMPLE_PATHS {
		assert_eq!(resolve(path, &rules), resolve(path, &[]), "path {path:?}");
	}
}

#[test]
fn test_splat_redirect_follows_pretty_url() {
	let rules = vec![
		RedirectRule::new("/old/*", "/new/:splat", 301),
		RedirectRule::new("/old/*", "/never/:splat", 301),
	];
	assert_eq!(
		resolve("/old/foo/bar", &rules),
		vec![
			HttpReply::new("my-site/old/foo/bar", 200),
			HttpReply::new("my-site/old/foo/bar.html", 200),
			HttpReply::new("/new/foo/bar", 301),
			HttpReply::new("/old/foo/bar/", 301),
			not_found(),
		]
	);
}

#[test]
fn test_rewrite_ends_with_target_resolution() {
	let rules = vec![RedirectRule::new("/a", "/b", 200)];
	let rewritten = resolve("/a", &rules);
	let direct = resolve("/b", &[]);

	assert_eq!(&rewritten[..2], &resolve("/a", &[])[..2]);
	assert_eq!(&rewritten[2..], direct.as_slice());
}

#[test]
fn test_rewrite_is_single_hop() {
	let rules = vec![
		RedirectRule::new("/a", "/b", 200),
		RedirectRule::new("/b", "/a", 200),
	];
	let out = resolve("/a", &rules);
	assert_eq!(out.len(), 6);
	assert_eq!(out.iter().filter(|r| r.status == 404).count(), 1);
}

#[test]
fn test_directory_index() {
	assert!(resolve("/blog/", &[]).contains(&HttpReply::new("my-site/blog/index.html", 200)));
}

#[test]
fn test_pretty_url_html() {
	assert!(resolve("/blog/post", &[]).contains(&HttpReply::new("my-site/blog/post.html", 200)));
	assert_eq!(
		resolve("/blog/post.txt", &[]),
		vec![
			HttpReply::new("my-site/blog/post.txt", 200),
			HttpReply::new("/blog/post.txt/", 301),
			not_found(),
		]
	);
}

#[test]
fn test_forced_rule_discards_earlier_candidates() {
	let rules = vec![RedirectRule::new("/about", "/team", 302).forced()];
	let out = resolve("/about", &rules);
	assert_eq!(out[0], HttpReply::new("/team", 302));
	assert!(!out.iter().any(|r| r.status == 200));
}

#[test]
fn test_redirect_query_from_redirects_file() {
	let out = resolve("/promo", &sample_rules());
	assert_eq!(out[0].location(), "/sale?ref=home");
}

#[test]
fn test_resolution_is_deterministic() {
	let rules = RuleSet::compile(&sample_rules());
	let resolver = RouteResolver::new();
	for path in SAMPLE_PATHS {
		assert_eq!(
			resolver.calc_routes(PROJECT, path, &rules),
			resolver.calc_routes(PROJECT, path, &rules)
		);
	}
}

#[test]
fn test_path_traversal_stays_in_project() {
	let out = resolve("/../../etc/passwd", &[]);
	assert_eq!(out[0], HttpReply::new("my-site/etc/passwd", 200));
	assert!(out.iter().filter(|r| !r.is_redirect()).all(|r| r.filepath.starts_with("my-site/")));
}

#[test]
fn test_concurrent_resolution_through_cache() {
	let cache = Arc::new(RuleCache::new());
	let rules = Arc::new(sample_rules());
	let expected = resolve("/old/x", &rules);

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let cache = Arc::clone(&cache);
			let rules = Arc::clone(&rules);
			thread::spawn(move || {
				let set = cache.rules_for(PROJECT, &rules);
				calc_routes(PROJECT, "/old/x", &set)
			})
		})
		.collect();

	for handle in handles {
		assert_eq!(handle.join().unwrap(), expected);
	}
	assert_eq!(cache.len(), 1);
}

#[test]
fn test_forced_empty_destination_clears_candidates() {
	let rules = parse_redirects_str("/gone/* :splat 301!").unwrap();
	assert_eq!(resolve("/gone/", &rules), vec![not_found()]);

	let rules = vec![RedirectRule::new("/gone/:page", "", 301).forced()];
	assert_eq!(
		resolve("/gone/page", &rules),
		vec![HttpReply::new("/gone/page/", 301), not_found()]
	);
}

#[test]
fn test_rewritten_hop_skips_rules() {
	let resolver = RouteResolver::new();
	let rules = RuleSet::compile(&[RedirectRule::new("/a", "/b", 301)]);
	assert_eq!(
		resolver.resolve(PROJECT, "/a", &rules, Hop::Rewritten),
		resolve("/a", &[])
	);
	assert_eq!(
		resolver.resolve(PROJECT, "/a", &rules, Hop::Initial),
		resolver.calc_routes(PROJECT, "/a", &rules)
	);
}
