use pretty_assertions::assert_eq;

use super::*;
use crate::entity::EnumKind;

fn build(source: &str) -> Result<Registry, BuildError> {
    Registry::from_json(source)
}

fn problems(source: &str) -> Vec<String> {
    match build(source) {
        Ok(_) => panic!("registry should be rejected"),
        Err(err) => err.problems().iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn empty_document_builds_empty_registry() {
    let registry = build("{}").expect("empty registry is valid");
    assert!(registry.constants().is_empty());
    assert!(registry.commands().is_empty());
    assert_eq!(registry.base_type_count(), 0);
}

#[test]
fn collections_keep_declaration_order() {
    let registry = build(
        r#"{
            "enums": [
                {"name": "VkResult", "values": [
                    {"name": "VK_SUCCESS", "value": 0},
                    {"name": "VK_NOT_READY", "value": 1},
                    {"name": "VK_ERROR_OUT_OF_HOST_MEMORY", "value": -1}
                ]},
                {"name": "VkCullModeFlagBits", "kind": "bitmask", "values": []}
            ]
        }"#,
    )
    .expect("valid registry");

    let names: Vec<&str> = registry.enums()[0]
        .values
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, ["VK_SUCCESS", "VK_NOT_READY", "VK_ERROR_OUT_OF_HOST_MEMORY"]);
    assert_eq!(registry.enums()[1].kind, EnumKind::Bitmask);
    assert_eq!(registry.enums()[0].kind, EnumKind::Enum);
}

#[test]
fn aliased_constant_ignores_its_own_value() {
    let registry = build(
        r#"{"constants": [
            {"name": "VK_TRUE", "type": "uint32", "value": "1U"},
            {"name": "VK_TRUE_KHR", "type": "float", "value": "9", "alias": "VK_TRUE"}
        ]}"#,
    )
    .expect("valid registry");

    let alias = registry.constant("VK_TRUE_KHR").expect("declared");
    assert_eq!(alias.def, ConstantDef::Alias("VK_TRUE".to_string()));
    assert_eq!(registry.constant_type(alias), Some(crate::ConstantType::U32));
}

#[test]
fn alias_chains_reach_their_root() {
    let registry = build(
        r#"{"constants": [
            {"name": "A", "type": "uint64_t", "value": "(~0ULL)"},
            {"name": "B", "alias": "A"},
            {"name": "C", "alias": "B"}
        ]}"#,
    )
    .expect("valid registry");

    let c = registry.constant("C").expect("declared");
    let root = registry.alias_root(c).expect("chain resolves");
    assert_eq!(root.name, "A");
}

#[test]
fn member_count_defaults_to_one() {
    let registry = build(
        r#"{"structs": [{"name": "VkExtent2D", "members": [
            {"name": "width", "type": "uint32_t"},
            {"name": "height", "type": "uint32_t", "count": 1}
        ]}]}"#,
    )
    .expect("valid registry");

    let extent = registry.structure("VkExtent2D").expect("declared");
    assert!(extent.members.iter().all(|m| m.count.get() == 1));
}

#[test]
fn command_return_type_defaults_to_void() {
    let registry = build(r#"{"commands": [{"name": "vkDoThing"}]}"#).expect("valid registry");
    let command = registry.command("vkDoThing").expect("declared");
    assert_eq!(command.prototype.return_type, "void");
    assert!(command.params.is_empty());
}

#[test]
fn bitwidth_selects_storage_width() {
    let registry = build(
        r#"{"enums": [{"name": "VkAccessFlagBits2", "kind": "bitmask", "bitwidth": 64}]}"#,
    )
    .expect("valid registry");
    assert_eq!(registry.enums()[0].width, EnumWidth::W64);
}

#[test]
fn syntax_errors_carry_a_position() {
    let err = build(r#"{"constants": [}"#).expect_err("not JSON");
    assert!(matches!(err, BuildError::Syntax(_)));
    assert!(err.to_string().contains("line 1"), "{err}");
}

#[test]
fn unknown_fields_are_rejected() {
    let err = build(r#"{"constnts": []}"#).expect_err("typo in collection name");
    assert!(matches!(err, BuildError::Syntax(_)));
}

#[test]
fn rejects_duplicate_names_within_a_collection() {
    assert_eq!(
        problems(r#"{"handles": [{"name": "VkDevice"}, {"name": "VkDevice"}]}"#),
        ["handles[1] `VkDevice`: duplicate name, first declared at index 0"]
    );
}

#[test]
fn same_name_in_different_collections_is_allowed() {
    build(
        r#"{
            "structs": [{"name": "Shared"}],
            "unions": [{"name": "Shared", "members": [{"name": "m", "type": "int"}]}]
        }"#,
    )
    .expect("uniqueness is per collection");
}

#[test]
fn rejects_empty_names() {
    assert_eq!(
        problems(r#"{"commands": [{"name": "vkDoThing", "parameters": [{"name": "", "type": "int"}]}]}"#),
        ["commands[0] `vkDoThing`: empty parameter name"]
    );
}

#[test]
fn rejects_zero_element_count() {
    assert_eq!(
        problems(r#"{"unions": [{"name": "U", "members": [{"name": "m", "type": "float", "count": 0}]}]}"#),
        ["unions[0] `U`: member `m` has an element count of 0"]
    );
}

#[test]
fn rejects_repeated_members() {
    assert_eq!(
        problems(
            r#"{"enums": [{"name": "E", "values": [
                {"name": "E_A", "value": 0}, {"name": "E_A", "value": 1}
            ]}]}"#
        ),
        ["enums[0] `E`: `E_A` is declared more than once"]
    );
}

#[test]
fn rejects_dangling_aliases() {
    assert_eq!(
        problems(
            r#"{
                "constants": [{"name": "X", "alias": "MISSING"}],
                "commands": [{"name": "vkAlias", "alias": "vkMissing"}]
            }"#
        ),
        [
            "constants[0] `X`: alias target `MISSING` is not declared",
            "commands[0] `vkAlias`: alias target `vkMissing` is not declared",
        ]
    );
}

#[test]
fn rejects_alias_cycles() {
    let found = problems(
        r#"{"commands": [
            {"name": "vkA", "alias": "vkB"},
            {"name": "vkB", "alias": "vkA"}
        ]}"#,
    );
    assert_eq!(found.len(), 2);
    assert!(found[0].contains("alias chain loops"), "{found:?}");
}

#[test]
fn rejects_constant_without_value() {
    assert_eq!(
        problems(r#"{"constants": [{"name": "VK_HALF", "type": "uint32"}]}"#),
        ["constants[0] `VK_HALF`: constant has neither a typed value nor an alias"]
    );
}

#[test]
fn constant_problems_keep_document_positions() {
    assert_eq!(
        problems(
            r#"{"constants": [
                {"name": "A", "type": "uint32"},
                {"name": "B", "alias": "Z"},
                {"name": "C", "alias": "A"}
            ]}"#
        ),
        [
            "constants[0] `A`: constant has neither a typed value nor an alias",
            "constants[1] `B`: alias target `Z` is not declared",
        ]
    );
}

#[test]
fn rejects_alias_on_func_pointer() {
    assert_eq!(
        problems(r#"{"func_pointers": [{"name": "PFN_a", "alias": "PFN_b"}]}"#),
        ["func_pointers[0] `PFN_a`: aliases are not allowed here (alias of `PFN_b`)"]
    );
}

#[test]
fn rejects_union_without_members() {
    assert_eq!(
        problems(r#"{"unions": [{"name": "VkClearValue"}]}"#),
        ["unions[0] `VkClearValue`: union declares no members"]
    );
}

#[test]
fn rejects_invalid_bitwidth() {
    assert_eq!(
        problems(r#"{"enums": [{"name": "E", "bitwidth": 16}]}"#),
        ["enums[0] `E`: unsupported bit width 16, expected 32 or 64"]
    );
}

#[test]
fn typedef_targets_may_be_native_or_declared() {
    build(
        r#"{
            "handles": [{"name": "VkInstance", "dispatchable": true}],
            "base_types": [{"name": "VkFlags", "type": "uint32_t"}],
            "typedefs": [
                {"name": "VkCullModeFlags", "type": "VkFlags"},
                {"name": "VkRaw", "type": "uint64_t"},
                {"name": "VkInstanceAlias", "type": "VkInstance"},
                {"name": "VkChained", "type": "VkCullModeFlags"}
            ]
        }"#,
    )
    .expect("all targets are known");
}

#[test]
fn rejects_unknown_typedef_target() {
    assert_eq!(
        problems(r#"{"typedefs": [{"name": "VkFooFlags", "type": "VkNowhere"}]}"#),
        ["typedefs[0] `VkFooFlags`: typedef target `VkNowhere` is not a declared or native type"]
    );
}

#[test]
fn rejects_typedef_cycles() {
    let found = problems(
        r#"{"typedefs": [
            {"name": "A", "type": "B"},
            {"name": "B", "type": "A"}
        ]}"#,
    );
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.contains("typedef chain loops")), "{found:?}");
}

#[test]
fn base_type_row_breaks_would_be_cycle() {
    // Resolution stops at the base-type row, so this chain terminates.
    build(
        r#"{
            "base_types": [{"name": "B", "type": "uint32_t"}],
            "typedefs": [
                {"name": "A", "type": "B"},
                {"name": "B", "type": "A"}
            ]
        }"#,
    )
    .expect("chain ends at the base type");
}

#[test]
fn reports_every_problem_at_once() {
    let err = build(
        r#"{
            "constants": [{"name": "X", "alias": "Y"}],
            "structs": [{"name": "S", "members": [{"name": "m", "type": "int", "count": 0}]}],
            "typedefs": [{"name": "T", "type": "Nowhere"}]
        }"#,
    )
    .expect_err("three problems");
    assert_eq!(err.problems().len(), 3);
    assert!(err.to_string().starts_with("invalid registry: 3 problems"), "{err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Registry::load(Path::new("/nonexistent/registry.json")).expect_err("no such file");
    assert!(matches!(err, BuildError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/registry.json"), "{err}");
}
