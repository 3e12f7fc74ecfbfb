//! Tests for the block schema registry and the built-in catalogue.
mod common;
use common::*;
use kumiki::error::RegistryError;
use kumiki::prelude::*;
use kumiki::schema::{Check, FieldDef, SocketDef, SocketKind, TemplatePart};
use pretty_assertions::assert_eq;

#[cfg(test)]
mod registry_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_kind_has_a_definition() {
        let registry = registry();
        for kind in BlockKind::ALL {
            let definition = registry.get(*kind);
            assert_eq!(definition.kind, *kind);
            assert_eq!(definition.type_name(), kind.type_name());
            assert!(!definition.template().is_empty(), "{} has no template", kind);
        }
        assert_eq!(registry.iter().count(), 26);
    }

    #[test]
    fn test_type_names_round_trip() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_type_name(kind.type_name()), Some(*kind));
        }
        assert_eq!(BlockKind::from_type_name("controls_if"), None);
    }

    #[test]
    fn test_missing_definition_fails_build() {
        let result = BlockRegistry::builder().without(BlockKind::DictKeys).build();
        assert_eq!(
            result.err(),
            Some(RegistryError::MissingDefinition {
                type_name: "dict_keys".to_string()
            })
        );
    }

    #[test]
    fn test_removed_definition_can_be_restored() {
        let original = registry().get(BlockKind::Print).clone();
        let rebuilt = BlockRegistry::builder()
            .without(BlockKind::Print)
            .with_definition(original)
            .build();
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_template_must_reference_every_argument() {
        let definition = BlockType::new(BlockKind::Print, Category::Io, "print")
            .socket(SocketDef::value("VALUE"))
            .statement(Check::Any);
        let result = BlockRegistry::builder().with_definition(definition).build();
        assert!(matches!(
            result,
            Err(RegistryError::InvalidTemplate { ref message, .. }) if message.contains("never placed")
        ));
    }

    #[test]
    fn test_template_out_of_range_placeholder() {
        let definition = BlockType::new(BlockKind::Print, Category::Io, "print %1 %2")
            .socket(SocketDef::value("VALUE"))
            .statement(Check::Any);
        let result = BlockRegistry::builder().with_definition(definition).build();
        assert!(matches!(
            result,
            Err(RegistryError::InvalidTemplate { ref message, .. }) if message.contains("out of range")
        ));
    }

    #[test]
    fn test_duplicate_argument_names_are_rejected() {
        let definition = BlockType::new(BlockKind::Print, Category::Io, "print %1 %2")
            .socket(SocketDef::value("VALUE"))
            .socket(SocketDef::value("VALUE"))
            .statement(Check::Any);
        let result = BlockRegistry::builder().with_definition(definition).build();
        assert_eq!(
            result.err(),
            Some(RegistryError::DuplicateArgument {
                type_name: "print_block".to_string(),
                name: "VALUE".to_string(),
            })
        );
    }

    #[test]
    fn test_output_and_previous_conflict() {
        let definition = BlockType::new(BlockKind::Input, Category::Io, "input %1")
            .socket(SocketDef::value("MESSAGE"))
            .output(Check::Any)
            .statement(Check::Any);
        let result = BlockRegistry::builder().with_definition(definition).build();
        assert!(matches!(
            result,
            Err(RegistryError::ConflictingConnections { .. })
        ));
    }

    #[test]
    fn test_aliases_resolve_to_canonical_kinds() {
        let registry = BlockRegistry::builder()
            .with_type_alias("text_print", "print_block")
            .build()
            .expect("alias should register");
        assert_eq!(registry.resolve("text_print"), Some(BlockKind::Print));
        assert_eq!(registry.resolve("print_block"), Some(BlockKind::Print));
        assert_eq!(registry.resolve("unknown"), None);
    }

    #[test]
    fn test_alias_errors() {
        let unknown_target = BlockRegistry::builder()
            .with_type_alias("foo", "not_a_block")
            .build();
        assert!(matches!(
            unknown_target,
            Err(RegistryError::UnknownAliasTarget { .. })
        ));

        let shadowing = BlockRegistry::builder()
            .with_type_alias("text", "print_block")
            .build();
        assert_eq!(
            shadowing.err(),
            Some(RegistryError::AliasConflict {
                alias: "text".to_string()
            })
        );
    }

    #[test]
    fn test_catalogue_defaults() {
        let registry = registry();
        let cases = [
            (BlockKind::VariableSet, "VALUE", "0"),
            (BlockKind::AddText, "TEXT", "''"),
            (BlockKind::Input, "MESSAGE", "\"\""),
            (BlockKind::Print, "VALUE", "\"\""),
            (BlockKind::DictPair, "VALUE", "None"),
            (BlockKind::DictGet, "DICT", "{}"),
            (BlockKind::LlmQuery, "OPTIONAL_PARSER", "StrOutputParser()"),
            (BlockKind::CreateModel, "MODEL_NAME", "\"gpt-3.5-turbo\""),
            (BlockKind::CreateModel, "OPTIONAL_TEMPERATURE", "0.7"),
            (BlockKind::InvokeChain, "CHAIN", "None"),
            (
                BlockKind::CreateRunnableWithMessageHistory,
                "OPTIONAL_GET_SESSION_HISTORY",
                "get_session_history",
            ),
            (BlockKind::CreateMessagesPlaceholder, "OPTIONAL_VARIABLE_NAME", "\"history\""),
            (BlockKind::InvokeRunnableWithMessageHistory, "CONFIG", "{}"),
        ];
        for (kind, socket, expected) in cases {
            assert_eq!(
                registry.socket_default(kind, socket),
                Some(expected),
                "default of {}.{}",
                kind,
                socket
            );
        }
    }

    #[test]
    fn test_composite_sockets_restrict_children() {
        let registry = registry();
        let pairs = registry
            .get(BlockKind::CreateDict)
            .socket_def("PAIRS")
            .expect("PAIRS socket");
        assert_eq!(pairs.kind, SocketKind::Statement);

        let pair_previous = registry
            .get(BlockKind::DictPair)
            .connections
            .previous
            .expect("dict_pair has a previous connection");
        let message_previous = registry
            .get(BlockKind::CreateMessage)
            .connections
            .previous
            .expect("create_message has a previous connection");
        assert!(pairs.check.accepts(pair_previous));
        assert!(!pairs.check.accepts(message_previous));
    }

    #[test]
    fn test_dropdown_fields() {
        let registry = registry();
        let provider = registry
            .get(BlockKind::CreateModel)
            .field_def("PROVIDER")
            .expect("PROVIDER field");
        assert!(provider.validate(&FieldValue::from("openai")).is_ok());
        assert!(provider.validate(&FieldValue::from("anthropic")).is_err());
        assert_eq!(provider.default_value(), Some(FieldValue::from("openai")));
        assert!(matches!(provider, FieldDef::Dropdown { .. }));
    }

    #[test]
    fn test_templates_and_labels() {
        let registry = registry();
        let dict_add = registry.get(BlockKind::DictAdd);
        assert_eq!(
            dict_add.template(),
            &[
                TemplatePart::Text("in".to_string()),
                TemplatePart::Arg(0),
                TemplatePart::Text("set key".to_string()),
                TemplatePart::Arg(1),
                TemplatePart::Text("to value".to_string()),
                TemplatePart::Arg(2),
            ]
        );
        assert_eq!(dict_add.display_label(), "in [DICT] set key [KEY] to value [VALUE]");
    }

    #[test]
    fn test_tooltips_quote_registry_defaults() {
        let registry = registry();
        let tooltip = registry.get(BlockKind::CreateModel).full_tooltip();
        assert!(tooltip.starts_with("Create an LLM model instance"));
        assert!(tooltip.contains("MODEL_NAME=\"gpt-3.5-turbo\""));
        assert!(tooltip.contains("OPTIONAL_TEMPERATURE=0.7"));
    }

    #[test]
    fn test_categories() {
        let registry = registry();
        let dictionary: Vec<_> = registry
            .by_category(Category::Dictionary)
            .map(|t| t.kind)
            .collect();
        assert_eq!(dictionary.len(), 9);
        assert!(dictionary.contains(&BlockKind::DictPair));
        assert_eq!(registry.get(BlockKind::Print).colour, 160);
        assert_eq!(registry.get(BlockKind::LlmQuery).colour, 290);
    }
}
