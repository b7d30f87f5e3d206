use crate::config::types::RedirectRule;
use crate::error::{Result, RouteError};
use crate::rules::destination::Destination;
use crate::rules::pattern::{Captures, Pattern};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A compiled rule ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: RedirectRule,

	/// Compiled source pattern.
	pub pattern: Pattern,

	/// Parsed destination template.
	pub destination: Destination,
}

/// A rule that matched a request path.
#[derive(Debug)]
pub struct RuleMatch<'a> {
	pub rule: &'a CompiledRule,
	pub captures: Captures,
}

impl RuleMatch<'_> {
	/// Destination with the captures substituted in.
	pub fn destination(&self) -> String {
		self.rule.destination.build(&self.captures)
	}
}

impl CompiledRule {
	/// Compile a single rule.
	pub fn compile(rule: &RedirectRule) -> Result<Self> {
		if !(100..=599).contains(&rule.status) {
			return Err(RouteError::InvalidStatus {
				from: rule.from.clone(),
				status: rule.status,
			});
		}

		Ok(CompiledRule {
			rule: rule.clone(),
			pattern: Pattern::compile(&rule.from)?,
			destination: Destination::parse(&rule.to),
		})
	}

	/// Match the whole request path against this rule's source pattern.
	pub fn matches(&self, path: &str) -> Option<Captures> {
		self.pattern.captures(path)
	}
}

/// An immutable snapshot of a project's compiled rules.
///
/// Self-redirects are dropped and malformed rules are set aside, so a bad
/// line never takes the rest of the rule set down with it.
#[derive(Debug, Default)]
pub struct RuleSet {
	rules: Vec<CompiledRule>,
	rejected: Vec<RouteError>,
	fingerprint: u64,
}

impl RuleSet {
	/// A rule set with nothing in it.
	pub fn empty() -> Self {
		Self::compile(&[])
	}

	/// Compile every rule, in declaration order.
	pub fn compile(rules: &[RedirectRule]) -> Self {
		let mut compiled = Vec::with_capacity(rules.len());
		let mut rejected = Vec::new();

		for rule in rules {
			if rule.is_self_redirect() {
				tracing::debug!(from = %rule.from, "ignoring rule that redirects to itself");
				continue;
			}
			match CompiledRule::compile(rule) {
				Ok(c) => compiled.push(c),
				Err(e) => {
					tracing::warn!(from = %rule.from, to = %rule.to, error = %e, "skipping invalid redirect rule");
					rejected.push(e);
				}
			}
		}

		RuleSet {
			rules: compiled,
			rejected,
			fingerprint: fingerprint(rules),
		}
	}

	/// Rules eligible for matching.
	pub fn rules(&self) -> &[CompiledRule] {
		&self.rules
	}

	/// Why each skipped rule was skipped.
	pub fn rejected(&self) -> &[RouteError] {
		&self.rejected
	}

	/// Content hash of the rules this set was compiled from.
	pub fn fingerprint(&self) -> u64 {
		self.fingerprint
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Find the first rule matching `path`.
	pub fn find_match(&self, path: &str) -> Option<RuleMatch<'_>> {
		find_matching_rule(&self.rules, path)
	}
}

/// Hash a rule list by content.
pub fn fingerprint(rules: &[RedirectRule]) -> u64 {
	let mut hasher = DefaultHasher::new();
	rules.hash(&mut hasher);
	hasher.finish()
}

/// Find the first matching rule for a request path.
pub fn find_matching_rule<'a>(rules: &'a [CompiledRule], path: &str) -> Option<RuleMatch<'a>> {
	rules.iter().find_map(|rule| {
		rule.matches(path)
			.map(|captures| RuleMatch { rule, captures })
	})
}
