#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::core::index::runtime::SyntaxRegistry;
use crate::core::key::{ChildKey, Key};
use crate::core::registry::Registry;
use crate::syntax::SyntaxInfo;

fn info(element: &str) -> Arc<SyntaxInfo> {
	Arc::new(
		SyntaxInfo::builder(element)
			.pattern(format!("{element} %objects%"))
			.build()
			.unwrap(),
	)
}

fn statement_tree() -> (Key<SyntaxInfo>, ChildKey<SyntaxInfo, SyntaxInfo>) {
	let statement = Key::of("statement");
	let effect = ChildKey::of(&statement, "effect");
	(statement, effect)
}

/// Invariant: A registration MUST become visible under the whole propagation chain at once.
///
/// Readers pinning a snapshot while a writer registers under a child key must never observe
/// a descriptor in the child bucket that is missing from the parent bucket.
pub(crate) fn inv_propagation_is_atomic() {
	const WRITES: usize = 200;

	let (statement, effect) = statement_tree();
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let done = AtomicBool::new(false);

	thread::scope(|scope| {
		scope.spawn(|| {
			for n in 0..WRITES {
				registry.register(&effect, info(&format!("Eff{n}"))).unwrap();
			}
			done.store(true, Ordering::Release);
		});

		scope.spawn(|| {
			while !done.load(Ordering::Acquire) {
				let snap = registry.snapshot();
				let effects = snap.syntaxes(&effect);
				let statements = snap.syntaxes(&statement);
				assert_eq!(effects.len(), statements.len());
				for effect_info in &effects {
					assert!(snap.contains(&statement, effect_info));
				}
				assert_eq!(snap.len(), effects.len());
			}
		});
	});

	assert_eq!(registry.syntaxes(&statement).len(), WRITES);
}

#[cfg_attr(test, test)]
pub(crate) fn test_propagation_is_atomic() {
	inv_propagation_is_atomic()
}

/// Invariant: An unregistration MUST disappear from the whole propagation chain at once.
pub(crate) fn inv_unregister_is_atomic() {
	const WRITES: usize = 200;

	let (statement, effect) = statement_tree();
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let infos: Vec<Arc<SyntaxInfo>> = (0..WRITES).map(|n| info(&format!("Eff{n}"))).collect();
	for info in &infos {
		registry.register(&effect, Arc::clone(info)).unwrap();
	}
	let done = AtomicBool::new(false);

	thread::scope(|scope| {
		scope.spawn(|| {
			for info in &infos {
				registry.unregister(&effect, info).unwrap();
			}
			done.store(true, Ordering::Release);
		});

		scope.spawn(|| {
			while !done.load(Ordering::Acquire) {
				let snap = registry.snapshot();
				let effects = snap.syntaxes(&effect);
				assert_eq!(effects.len(), snap.syntaxes(&statement).len());
				assert_eq!(snap.elements().len(), effects.len());
			}
		});
	});

	assert!(registry.syntaxes(&statement).is_empty());
	assert!(registry.is_empty());
}

#[cfg_attr(test, test)]
pub(crate) fn test_unregister_is_atomic() {
	inv_unregister_is_atomic()
}

/// Invariant: Unregistration MUST remove the registration from every bucket it reached.
pub(crate) fn inv_unregister_clears_whole_chain() {
	let (statement, effect) = statement_tree();
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let drop = info("EffDrop");

	registry.register(&effect, Arc::clone(&drop)).unwrap();
	assert!(registry.contains(&effect, &drop));
	assert!(registry.contains(&statement, &drop));

	registry.unregister(&effect, &drop).unwrap();
	assert!(!registry.contains(&effect, &drop));
	assert!(!registry.contains(&statement, &drop));
	assert!(registry.elements().is_empty());
	assert_eq!(registry.snapshot().key_count(), 0);

	// Removing through the ancestor key reaches the descendant bucket too.
	registry.register(&effect, Arc::clone(&drop)).unwrap();
	registry.unregister(&statement, &drop).unwrap();
	assert!(registry.syntaxes(&effect).is_empty());
	assert!(registry.syntaxes(&statement).is_empty());
	assert!(registry.is_empty());
}

#[cfg_attr(test, test)]
pub(crate) fn test_unregister_clears_whole_chain() {
	inv_unregister_clears_whole_chain()
}

/// Invariant: Concurrent registrations MUST all land (no lost updates).
pub(crate) fn inv_no_lost_updates() {
	const THREADS: usize = 8;
	const PER_THREAD: usize = 50;

	let (statement, effect) = statement_tree();
	let registry: SyntaxRegistry = SyntaxRegistry::empty();

	thread::scope(|scope| {
		for t in 0..THREADS {
			let registry = &registry;
			let effect = &effect;
			scope.spawn(move || {
				for n in 0..PER_THREAD {
					registry.register(effect, info(&format!("Eff{t}x{n}"))).unwrap();
				}
			});
		}
	});

	assert_eq!(registry.len(), THREADS * PER_THREAD);
	assert_eq!(registry.syntaxes(&effect).len(), THREADS * PER_THREAD);
	assert_eq!(registry.syntaxes(&statement).len(), THREADS * PER_THREAD);

	// Per-thread registration order survives interleaving.
	for t in 0..THREADS {
		let prefix = format!("Eff{t}x");
		let seen: Vec<usize> = registry
			.syntaxes(&effect)
			.iter()
			.filter_map(|s| s.element().strip_prefix(&prefix)?.parse().ok())
			.collect();
		assert_eq!(seen, (0..PER_THREAD).collect::<Vec<_>>());
	}
}

#[cfg_attr(test, test)]
pub(crate) fn test_no_lost_updates() {
	inv_no_lost_updates()
}

/// Invariant: Query results MUST NOT change after they are returned.
pub(crate) fn inv_query_results_are_snapshots() {
	let (statement, effect) = statement_tree();
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let drop = info("EffDrop");
	registry.register(&effect, Arc::clone(&drop)).unwrap();

	let listed = registry.syntaxes(&statement);
	let elements = registry.elements();
	let pinned = registry.snapshot();

	registry.register(&effect, info("EffKill")).unwrap();
	registry.unregister(&effect, &drop).unwrap();

	assert_eq!(listed.len(), 1);
	assert!(Arc::ptr_eq(&listed[0], &drop));
	assert_eq!(elements.len(), 1);
	assert_eq!(pinned.syntaxes(&effect).len(), 1);
	assert!(pinned.contains(&effect, &drop));

	let current = registry.syntaxes(&statement);
	assert_eq!(current.len(), 1);
	assert_eq!(current[0].element(), "EffKill");
}

#[cfg_attr(test, test)]
pub(crate) fn test_query_results_are_snapshots() {
	inv_query_results_are_snapshots()
}
