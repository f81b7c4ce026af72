use super::*;

#[test]
fn builder_defaults() {
	let info = SyntaxInfo::builder("EffTeleport")
		.pattern("teleport %entities% to %location%")
		.build()
		.unwrap();
	assert_eq!(info.element(), "EffTeleport");
	assert_eq!(info.origin(), &Origin::Builtin);
	assert_eq!(info.priority(), Priority::Combined);
	assert_eq!(info.patterns().collect::<Vec<_>>(), ["teleport %entities% to %location%"]);
}

#[test]
fn builder_keeps_pattern_order() {
	let info = SyntaxInfo::builder("ExprPassengers")
		.origin(Origin::addon("vehicles"))
		.priority(Priority::Simple)
		.patterns(["[all [of]] [the] passenger[s] of %entities%", "%entities%'[s] passenger[s]"])
		.build()
		.unwrap();
	assert_eq!(info.patterns().len(), 2);
	assert_eq!(info.patterns().nth(1), Some("%entities%'[s] passenger[s]"));
	assert_eq!(info.origin().to_string(), "addon:vehicles");
}

#[test]
fn builder_rejects_missing_patterns() {
	let err = SyntaxInfo::builder("EffNothing").build().unwrap_err();
	assert_eq!(
		err,
		SyntaxInfoError::NoPatterns {
			element: "EffNothing".into()
		}
	);
}

#[test]
fn builder_rejects_blank_pattern() {
	let err = SyntaxInfo::builder("CondIsValid")
		.pattern("%objects% (is|are) valid")
		.pattern("   ")
		.build()
		.unwrap_err();
	assert_eq!(
		err,
		SyntaxInfoError::BlankPattern {
			element: "CondIsValid".into(),
			index: 1,
		}
	);
}

#[test]
fn builder_rejects_blank_element() {
	let err = SyntaxInfo::builder(" ").pattern("x").build().unwrap_err();
	assert_eq!(err, SyntaxInfoError::EmptyElement);
}

#[test]
fn expression_kind_sets_priority() {
	let info = ExpressionInfo::builder("ExprCurrentInputKeys", "inputkey")
		.kind(ExpressionKind::Event)
		.pattern("[the] [current] (input|key) keys of %players%")
		.build()
		.unwrap();
	assert_eq!(info.kind(), ExpressionKind::Event);
	assert_eq!(info.info().priority(), Priority::Simple);
	assert_eq!(info.return_type(), "inputkey");

	let err = ExpressionInfo::builder("ExprVoid", "")
		.pattern("void")
		.build()
		.unwrap_err();
	assert_eq!(
		err,
		SyntaxInfoError::EmptyReturnType {
			element: "ExprVoid".into()
		}
	);
}

#[test]
fn priorities_order_simple_first() {
	assert!(Priority::Simple < Priority::Combined);
	assert!(Priority::Combined < Priority::PatternMatchesEverything);
	assert_eq!(ExpressionKind::Property.priority(), Priority::Combined);
	assert_eq!(ExpressionKind::PatternMatchesEverything.priority(), Priority::PatternMatchesEverything);
}

#[test]
fn structure_node_types() {
	let info = StructureInfo::builder("StructCommand")
		.node_type(NodeType::Section)
		.pattern("command <.+>")
		.build()
		.unwrap();
	assert!(info.node_type().allows_section());
	assert!(!info.node_type().allows_simple());
	assert!(NodeType::Both.allows_simple() && NodeType::Both.allows_section());
}

#[test]
fn serializes_for_documentation() {
	let info = ExpressionInfo::builder("ExprHealth", "number")
		.origin(Origin::addon("combat"))
		.kind(ExpressionKind::Property)
		.pattern("[the] health of %livingentities%")
		.build()
		.unwrap();
	let json = serde_json::to_value(&info).unwrap();
	assert_eq!(
		json,
		serde_json::json!({
			"element": "ExprHealth",
			"origin": { "addon": "combat" },
			"priority": "combined",
			"patterns": ["[the] health of %livingentities%"],
			"return_type": "number",
			"kind": "property",
		})
	);

	let structure = StructureInfo::builder("EvtJoin").pattern("[on] join").build().unwrap();
	let json = serde_json::to_value(&structure).unwrap();
	assert_eq!(json["origin"], "builtin");
	assert_eq!(json["node_type"], "section");
}
