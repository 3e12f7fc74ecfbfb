//! Unit tests for core kumiki types.
mod common;
use kumiki::error::{EmitError, RegistryError, StorageError, WorkspaceError};
use kumiki::generator::names::{format_number, quote};
use kumiki::prelude::*;

#[test]
fn test_order_display() {
    assert_eq!(format!("{}", Order::Member), "member access");
    assert_eq!(format!("{}", Order::BitwiseOr), "bitwise or");
    assert_eq!(format!("{}", Order::None), "none");
}

#[test]
fn test_emission_rendering() {
    let expression = Emission::expression("len(x)", Order::FunctionCall);
    assert_eq!(expression.order(), Order::FunctionCall);
    assert_eq!(expression.clone().into_value(), "len(x)");
    assert_eq!(expression.into_statement(), "len(x)\n");

    let statement = Emission::statement("x = 1\n");
    assert_eq!(statement.order(), Order::Atomic);
    assert_eq!(statement.clone().into_value(), "x = 1");
    assert_eq!(statement.into_statement(), "x = 1\n");

    assert_eq!(Emission::item("'a': 1").into_statement(), "'a': 1\n");
}

#[test]
fn test_field_value_display() {
    assert_eq!(FieldValue::from("hi").to_string(), "\"hi\"");
    assert_eq!(FieldValue::from(3.0).to_string(), "3");
    assert_eq!(FieldValue::from(0.25).to_string(), "0.25");
    // Beyond the i64 range whole numbers still print exactly.
    assert_eq!(FieldValue::from(1e19).to_string(), "10000000000000000000");
    assert_eq!(FieldValue::from(-4.0).to_string(), "-4");
    assert_eq!(FieldValue::from(true).to_string(), "true");
    assert_eq!(FieldValue::from(VariableRef::new("v1")).to_string(), "$v1");
}

#[test]
fn test_field_value_deserialization() {
    let values: Vec<FieldValue> =
        serde_json::from_str(r#"["text", 12, false, {"id": "v1", "name": "x"}]"#)
            .expect("field values should parse");
    assert_eq!(values[0], FieldValue::Text("text".to_string()));
    assert_eq!(values[1].as_number(), Some(12.0));
    assert_eq!(values[2], FieldValue::Bool(false));
    let reference = values[3].as_variable().expect("variable reference");
    assert_eq!(reference.id, "v1");
    assert_eq!(reference.name.as_deref(), Some("x"));

    // Numeric text, as older documents store NUM fields.
    assert_eq!(FieldValue::from(" 4.5 ").as_number(), Some(4.5));
}

#[test]
fn test_python_literals() {
    assert_eq!(quote("a'b\"c"), "'a\\'b\"c'");
    assert_eq!(quote("line\r\nbreak"), "'line\\r\\nbreak'");
    assert_eq!(format_number(-2.0), ("-2".to_string(), Order::UnarySign));
    assert_eq!(format_number(1.5), ("1.5".to_string(), Order::Atomic));
    assert_eq!(
        format_number(f64::INFINITY),
        ("float('inf')".to_string(), Order::FunctionCall)
    );
}

#[test]
fn test_error_display() {
    let error = WorkspaceError::UnknownBlockType {
        block_id: "b1".to_string(),
        type_name: "controls_if".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Block 'b1' has an unregistered block type: 'controls_if'"
    );

    let error = RegistryError::MissingDefinition {
        type_name: "dict_keys".to_string(),
    };
    assert!(error.to_string().contains("dict_keys"));

    let error = EmitError::UnknownVariable {
        block_id: "g".to_string(),
        variable_id: "v9".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Block 'g' references undeclared variable 'v9'"
    );

    let storage = StorageError::Serialize("boom".to_string());
    let wrapped: WorkspaceError = storage.clone().into();
    assert_eq!(wrapped.to_string(), storage.to_string());
}

#[test]
fn test_block_builders() {
    let block = Block::new(BlockKind::Print)
        .with_next(Block::new(BlockKind::AddText))
        .with_next(Block::new(BlockKind::Print));
    assert_eq!(block.chain().count(), 3);
    assert_eq!(block.subtree_size(), 1);

    let nested = Block::new(BlockKind::Print).with_input("VALUE", Block::text("x"));
    assert_eq!(nested.input("VALUE").map(|b| b.kind), Some(BlockKind::Text));
    assert_eq!(nested.input("MISSING"), None);
    assert_eq!(nested.subtree_size(), 2);
}
