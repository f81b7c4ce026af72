use std::sync::Arc;

use crate::core::index::runtime::SyntaxRegistry;
use crate::core::key::{ChildKey, Key};
use crate::core::registry::Registry;
use crate::syntax::{SyntaxElement, SyntaxInfo};

fn info(element: &str, pattern: &str) -> Arc<SyntaxInfo> {
	Arc::new(SyntaxInfo::builder(element).pattern(pattern).build().unwrap())
}

fn names(infos: &[Arc<SyntaxInfo>]) -> Vec<&str> {
	infos.iter().map(|i| i.element()).collect()
}

/// Verifies that a descriptor registered under a child key is visible under the child, its
/// parent, and in the element list exactly once.
#[test]
fn test_child_registration_propagates() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let drop = info("EffDrop", "drop %itemtypes%");

	registry.register(&effect, Arc::clone(&drop)).unwrap();

	assert_eq!(names(&registry.syntaxes(&effect)), ["EffDrop"]);
	assert_eq!(names(&registry.syntaxes(&statement)), ["EffDrop"]);
	let elements = registry.elements();
	assert_eq!(elements.len(), 1);
	assert_eq!(elements[0].info().element(), "EffDrop");
}

/// Verifies that registering the same descriptor twice yields two entries everywhere.
#[test]
fn test_register_is_not_idempotent() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let drop = info("EffDrop", "drop %itemtypes%");

	registry.register(&effect, Arc::clone(&drop)).unwrap();
	registry.register(&effect, Arc::clone(&drop)).unwrap();

	assert_eq!(registry.syntaxes(&effect).len(), 2);
	assert_eq!(registry.syntaxes(&statement).len(), 2);
	assert_eq!(registry.elements().len(), 2);

	// One unregister removes one of them.
	registry.unregister(&effect, &drop).unwrap();
	assert_eq!(registry.syntaxes(&effect).len(), 1);
	assert_eq!(registry.syntaxes(&statement).len(), 1);
	assert_eq!(registry.elements().len(), 1);
}

/// Verifies that buckets keep insertion order, including entries propagated from children.
#[test]
fn test_insertion_order() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let condition = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "condition");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();

	registry.register(&effect, info("EffA", "a")).unwrap();
	registry.register(&statement, info("StmtB", "b")).unwrap();
	registry.register(&condition, info("CondC", "c")).unwrap();
	registry.register(&effect, info("EffD", "d")).unwrap();

	assert_eq!(names(&registry.syntaxes(&statement)), ["EffA", "StmtB", "CondC", "EffD"]);
	assert_eq!(names(&registry.syntaxes(&effect)), ["EffA", "EffD"]);
	assert_eq!(names(&registry.syntaxes(&condition)), ["CondC"]);
}

/// Verifies that parent-key registrations never leak down into child buckets.
#[test]
fn test_no_downward_propagation() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();

	registry.register(&statement, info("StmtLoop", "loop %objects%")).unwrap();

	assert_eq!(registry.syntaxes(&statement).len(), 1);
	assert!(registry.syntaxes(&effect).is_empty());
}

/// Verifies that unknown keys yield an empty result instead of failing.
#[test]
fn test_unknown_key_is_empty() {
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let nowhere = Key::<SyntaxInfo>::of("nowhere");
	assert!(registry.syntaxes(&nowhere).is_empty());
	assert!(registry.elements().is_empty());
	assert!(registry.is_empty());
}

/// Verifies that keys with the same name are distinct partitions.
#[test]
fn test_same_name_keys_are_distinct() {
	let first = Key::<SyntaxInfo>::of("effect");
	let second = Key::<SyntaxInfo>::of("effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();

	registry.register(&first, info("EffA", "a")).unwrap();

	assert_eq!(registry.syntaxes(&first).len(), 1);
	assert!(registry.syntaxes(&second).is_empty());
}

/// Verifies that unregistration compares descriptors by identity, not by value.
#[test]
fn test_unregister_matches_identity() {
	let key = Key::<SyntaxInfo>::of("effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let original = info("EffDrop", "drop %itemtypes%");
	let lookalike = info("EffDrop", "drop %itemtypes%");
	assert_eq!(*original, *lookalike);

	registry.register(&key, Arc::clone(&original)).unwrap();
	registry.unregister(&key, &lookalike).unwrap();
	assert_eq!(registry.syntaxes(&key).len(), 1);

	registry.unregister(&key, &original).unwrap();
	assert!(registry.syntaxes(&key).is_empty());
}

/// Verifies that unregistering an absent descriptor is a silent no-op.
#[test]
fn test_unregister_absent_is_noop() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let kept = info("EffKeep", "keep");
	registry.register(&effect, Arc::clone(&kept)).unwrap();
	let before = registry.snapshot();

	registry.unregister(&effect, &info("EffGone", "gone")).unwrap();

	// Registered under the parent only, so the child bucket never held it.
	let stmt = info("StmtOnly", "only");
	registry.register(&statement, Arc::clone(&stmt)).unwrap();
	registry.unregister(&effect, &stmt).unwrap();
	assert_eq!(registry.syntaxes(&statement).len(), 2);
	registry.unregister(&statement, &stmt).unwrap();

	let after = registry.snapshot();
	assert_eq!(names(&before.syntaxes(&statement)), names(&after.syntaxes(&statement)));
	assert_eq!(before.len(), after.len());
}

/// Verifies that register followed by unregister restores every observable query.
#[test]
fn test_register_unregister_round_trip() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let a = info("EffA", "a");
	let b = info("EffB", "b");
	registry.register(&effect, Arc::clone(&a)).unwrap();
	registry.register(&statement, Arc::clone(&b)).unwrap();

	let statements = names(&registry.syntaxes(&statement)).join(",");
	let effects = names(&registry.syntaxes(&effect)).join(",");

	// Re-registering an existing descriptor then removing it drops the newer copy only.
	registry.register(&effect, Arc::clone(&a)).unwrap();
	registry.unregister(&effect, &a).unwrap();

	assert_eq!(names(&registry.syntaxes(&statement)).join(","), statements);
	assert_eq!(names(&registry.syntaxes(&effect)).join(","), effects);
	assert_eq!(registry.elements().len(), 2);
}

/// Verifies propagation through three levels and removal through any level.
#[test]
fn test_three_level_chain() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let player_effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&effect, "player effect");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let kick = info("EffKick", "kick %players%");

	registry.register(&player_effect, Arc::clone(&kick)).unwrap();
	assert!(registry.contains(&player_effect, &kick));
	assert!(registry.contains(&effect, &kick));
	assert!(registry.contains(&statement, &kick));
	assert_eq!(registry.snapshot().key_count(), 3);

	registry.unregister(&effect, &kick).unwrap();
	assert!(!registry.contains(&player_effect, &kick));
	assert!(!registry.contains(&statement, &kick));
	assert!(registry.is_empty());
}

/// Verifies that unregistering through an ancestor removes the most recent matching
/// registration, wherever in the subtree it was made.
#[test]
fn test_unregister_via_ancestor_picks_latest() {
	let statement = Key::<SyntaxInfo>::of("statement");
	let effect = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "effect");
	let condition = ChildKey::<SyntaxInfo, SyntaxInfo>::of(&statement, "condition");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let shared = info("SharedSyntax", "shared");

	registry.register(&effect, Arc::clone(&shared)).unwrap();
	registry.register(&condition, Arc::clone(&shared)).unwrap();

	registry.unregister(&statement, &shared).unwrap();
	assert_eq!(registry.syntaxes(&effect).len(), 1);
	assert!(registry.syntaxes(&condition).is_empty());
	assert_eq!(registry.syntaxes(&statement).len(), 1);
}

/// Verifies that a pinned snapshot is unaffected by later writes.
#[test]
fn test_snapshot_isolation() {
	let key = Key::<SyntaxInfo>::of("section");
	let registry: SyntaxRegistry = SyntaxRegistry::empty();
	let first = info("SecLoop", "loop %objects%");
	registry.register(&key, Arc::clone(&first)).unwrap();

	let pinned = registry.snapshot();
	registry.register(&key, info("SecWhile", "while %condition%")).unwrap();
	registry.unregister(&key, &first).unwrap();

	assert_eq!(names(&pinned.syntaxes(&key)), ["SecLoop"]);
	assert_eq!(pinned.elements().len(), 1);
	assert_eq!(names(&registry.syntaxes(&key)), ["SecWhile"]);
	assert!(!pinned.is_empty());
}

/// Verifies that `elements` reports the registered descriptor through the element category.
#[test]
fn test_elements_upcast_to_category() {
	let key = Key::<SyntaxInfo>::of("effect");
	let registry: SyntaxRegistry = SyntaxRegistry::with_label("addon");
	let drop = info("EffDrop", "drop %itemtypes%");
	registry.register(&key, Arc::clone(&drop)).unwrap();

	let elements = registry.elements();
	let element: &dyn SyntaxElement = &*elements[0];
	assert_eq!(element.info().element(), "EffDrop");
	assert_eq!(
		Arc::as_ptr(&elements[0]).cast::<()>(),
		Arc::as_ptr(&drop).cast::<()>()
	);
	assert_eq!(registry.label(), "addon");
	assert!(format!("{registry:?}").contains("addon"));
}
