//! Integration tests for kumiki
//!
//! End-to-end tests: workspace documents in, complete Python documents out.
//!
mod common;
use common::*;
use indoc::indoc;
use kumiki::config::DEFAULT_HEADER;
use kumiki::prelude::*;
use pretty_assertions::assert_eq;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transpile(json: &str, options: GeneratorOptions) -> String {
        let registry = registry();
        let workspace = json.into_workspace(&registry).expect("document should convert");
        Generator::builder(&registry)
            .with_options(options)
            .build()
            .workspace_to_code(&workspace)
            .expect("workspace should generate")
    }

    #[test]
    fn test_simple_workspace_document() {
        let code = transpile(SIMPLE_WORKSPACE_JSON, GeneratorOptions::default());
        let expected = indoc! {"
            #!/usr/bin/env python3
            # Generated Python code from Blockly
            # You can copy this code and run it in any Python environment

            person = None

            person = {'name': 'Ada', 'age': 36}
            print(person['name'])
        "};
        assert_eq!(code, expected);
    }

    #[test]
    fn test_llm_workspace_document() {
        let code = transpile(LLM_WORKSPACE_JSON, GeneratorOptions {
            header: None,
            ..GeneratorOptions::default()
        });
        let expected = indoc! {"
            from langchain_core.output_parsers import StrOutputParser
            from langchain_core.prompts import ChatPromptTemplate
            from langchain_openai import ChatOpenAI

            print((ChatPromptTemplate.from_messages([('human', 'Tell me about {topic}')]) | ChatOpenAI(model='gpt-4o', temperature=0.7) | StrOutputParser()).invoke({'topic': 'owls'}))
        "};
        assert_eq!(code, expected);
    }

    #[test]
    fn test_imports_from_one_module_are_grouped() {
        let registry = registry();
        let prompt = Block::new(BlockKind::CreateChatPromptTemplate).with_input(
            "MESSAGES",
            Block::new(BlockKind::CreateMessagesPlaceholder).with_next(message("human", "{input}")),
        );
        let workspace = Workspace::new().with_block(Block::new(BlockKind::Print).with_input("VALUE", prompt));
        let code = Generator::builder(&registry)
            .with_header(None)
            .with_variable_declarations(false)
            .build()
            .workspace_to_code(&workspace)
            .expect("workspace should generate");
        assert!(code.starts_with(
            "from langchain_core.prompts import ChatPromptTemplate, MessagesPlaceholder\n\n"
        ));
    }

    #[test]
    fn test_bare_options() {
        let code = transpile(LLM_WORKSPACE_JSON, GeneratorOptions::bare());
        assert!(code.starts_with("print((ChatPromptTemplate"));
        assert_eq!(code.lines().count(), 1);
    }

    #[test]
    fn test_empty_workspace() {
        let registry = registry();
        let empty = Workspace::new();
        let with_header = Generator::new(&registry)
            .workspace_to_code(&empty)
            .expect("empty workspace");
        assert_eq!(with_header, format!("{}\n", DEFAULT_HEADER));
        assert_eq!(bare_code(&registry, &empty), "");
    }

    #[test]
    fn test_variables_without_blocks_are_declared() {
        let registry = registry();
        let workspace = Workspace::new()
            .with_variable("a", "count")
            .with_variable("b", "count")
            .with_variable("c", "class");
        let code = Generator::builder(&registry)
            .with_header(None)
            .build()
            .workspace_to_code(&workspace)
            .expect("workspace should generate");
        assert_eq!(code, "count = None\ncount2 = None\nclass2 = None\n");
    }

    #[test]
    fn test_top_blocks_in_reading_order() {
        let registry = registry();
        let workspace = Workspace::new()
            .with_block(Block::new(BlockKind::Print).with_input("VALUE", Block::text("third")).at(0.0, 200.0))
            .with_block(Block::new(BlockKind::Print).with_input("VALUE", Block::text("second")).at(300.0, 10.0))
            .with_block(Block::new(BlockKind::Print).with_input("VALUE", Block::text("first")).at(20.0, 10.0));
        assert_eq!(
            bare_code(&registry, &workspace),
            indoc! {"
                print('first')

                print('second')

                print('third')
            "}
        );
    }

    #[test]
    fn test_disabled_blocks_are_skipped_but_chain_continues() {
        let registry = registry();
        let chain = Block::new(BlockKind::Print)
            .with_input("VALUE", Block::text("a"))
            .disabled()
            .with_next(Block::new(BlockKind::Print).with_input("VALUE", Block::text("b")))
            .with_next(Block::new(BlockKind::AddText).with_input("TEXT", Block::text("c")));
        let workspace = Workspace::new().with_block(chain);
        assert_eq!(
            bare_code(&registry, &workspace),
            "print('b')\n# Add text to output\nprint('c')\n"
        );
    }

    #[test]
    fn test_loose_value_blocks_become_lines() {
        let registry = registry();
        let workspace = Workspace::new()
            .with_block(Block::number(7.0).at(0.0, 0.0))
            .with_block(Block::new(BlockKind::DictLength).at(0.0, 50.0));
        assert_eq!(bare_code(&registry, &workspace), "7\n\nlen({})\n");
    }

    #[test]
    fn test_generation_does_not_modify_workspace() {
        let registry = registry();
        let workspace = SIMPLE_WORKSPACE_JSON
            .into_workspace(&registry)
            .expect("fixture should convert");
        let before = workspace.clone();
        let generator = Generator::new(&registry);
        let first = generator.workspace_to_code(&workspace).expect("first run");
        let second = generator.workspace_to_code(&workspace).expect("second run");
        assert_eq!(first, second);
        assert_eq!(workspace, before);
    }

    #[test]
    fn test_options_from_json() {
        let options = GeneratorOptions::from_json(r#"{"header": null, "declare_variables": false}"#)
            .expect("options should parse");
        let code = transpile(SIMPLE_WORKSPACE_JSON, options);
        assert_eq!(code, "person = {'name': 'Ada', 'age': 36}\nprint(person['name'])\n");
    }
}
