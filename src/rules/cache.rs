use crate::config::types::RedirectRule;
use crate::rules::matcher::{RuleSet, fingerprint};
use dashmap::DashMap;
use std::sync::Arc;

/// Per-project cache of compiled rule sets.
///
/// Entries are immutable snapshots. A changed rule list compiles a new
/// snapshot and swaps it in; readers holding the old `Arc` keep using it.
#[derive(Debug, Default)]
pub struct RuleCache {
	sets: DashMap<String, Arc<RuleSet>>,
}

impl RuleCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Compiled rules for `project`, recompiling when `rules` changed.
	pub fn rules_for(&self, project: &str, rules: &[RedirectRule]) -> Arc<RuleSet> {
		let wanted = fingerprint(rules);

		if let Some(set) = self.sets.get(project)
			&& set.fingerprint() == wanted
		{
			return Arc::clone(&set);
		}

		tracing::debug!(project, rules = rules.len(), "compiling redirect rules");
		let set = Arc::new(RuleSet::compile(rules));
		self.sets.insert(project.to_string(), Arc::clone(&set));
		set
	}

	/// Drop the cached rules for a project after its configuration changed.
	pub fn invalidate(&self, project: &str) -> bool {
		self.sets.remove(project).is_some()
	}

	pub fn clear(&self) {
		self.sets.clear();
	}

	pub fn len(&self) -> usize {
		self.sets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sets.is_empty()
	}
}
