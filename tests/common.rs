//! Common test utilities: registry and generator helpers, block builders and JSON fixtures.
use kumiki::prelude::*;

/// The standard registry; panics if the built-in catalogue is inconsistent.
#[allow(dead_code)]
pub fn registry() -> BlockRegistry {
    BlockRegistry::standard().expect("standard registry should build")
}

/// Emits a single block as value code.
#[allow(dead_code)]
pub fn value_code(registry: &BlockRegistry, block: &Block) -> String {
    Generator::new(registry)
        .emit_block(block)
        .expect("block should emit")
        .into_value()
}

/// Emits a single block as statement code.
#[allow(dead_code)]
pub fn statement_code(registry: &BlockRegistry, block: &Block) -> String {
    Generator::new(registry)
        .emit_block(block)
        .expect("block should emit")
        .into_statement()
}

/// Generates a workspace with no header, imports or declarations.
#[allow(dead_code)]
pub fn bare_code(registry: &BlockRegistry, workspace: &Workspace) -> String {
    Generator::builder(registry)
        .with_options(GeneratorOptions::bare())
        .build()
        .workspace_to_code(workspace)
        .expect("workspace should generate")
}

/// `key: value` pair block with text key and number value.
#[allow(dead_code)]
pub fn pair(key: &str, value: f64) -> Block {
    Block::new(BlockKind::DictPair)
        .with_input("KEY", Block::text(key))
        .with_input("VALUE", Block::number(value))
}

/// A message block of the given type with text content.
#[allow(dead_code)]
pub fn message(message_type: &str, content: &str) -> Block {
    Block::new(BlockKind::CreateMessage)
        .with_field("MESSAGE_TYPE", message_type)
        .with_input("CONTENT", Block::text(content))
}

/// `create_chain` over a two-message prompt and a default model.
#[allow(dead_code)]
pub fn simple_chain() -> Block {
    let prompt = Block::new(BlockKind::CreateChatPromptTemplate).with_input(
        "MESSAGES",
        message("system", "You are terse.").with_next(message("human", "{question}")),
    );
    Block::new(BlockKind::CreateChain)
        .with_input("TEMPLATE", prompt)
        .with_input("MODEL", Block::new(BlockKind::CreateModel))
}

/// A print statement followed by a dictionary assignment, with one variable.
#[allow(dead_code)]
pub const SIMPLE_WORKSPACE_JSON: &str = r#"{
  "blocks": {
    "languageVersion": 0,
    "blocks": [
      {
        "type": "variables_set",
        "id": "set1",
        "x": 20,
        "y": 20,
        "fields": { "VAR": { "id": "v1" } },
        "inputs": {
          "VALUE": {
            "block": {
              "type": "create_dict",
              "id": "dict1",
              "inputs": {
                "PAIRS": {
                  "block": {
                    "type": "dict_pair",
                    "id": "pair1",
                    "inputs": {
                      "KEY": { "block": { "type": "text", "id": "k1", "fields": { "TEXT": "name" } } },
                      "VALUE": { "block": { "type": "text", "id": "val1", "fields": { "TEXT": "Ada" } } }
                    },
                    "next": {
                      "block": {
                        "type": "dict_pair",
                        "id": "pair2",
                        "inputs": {
                          "KEY": { "block": { "type": "text", "id": "k2", "fields": { "TEXT": "age" } } },
                          "VALUE": { "block": { "type": "math_number", "id": "n1", "fields": { "NUM": 36 } } }
                        }
                      }
                    }
                  }
                }
              }
            }
          }
        },
        "next": {
          "block": {
            "type": "print_block",
            "id": "print1",
            "inputs": {
              "VALUE": {
                "block": {
                  "type": "dict_get",
                  "id": "get1",
                  "inputs": {
                    "DICT": { "block": { "type": "variables_get", "id": "vg1", "fields": { "VAR": { "id": "v1" } } } },
                    "KEY": { "shadow": { "type": "text", "id": "k3", "fields": { "TEXT": "name" } } }
                  }
                }
              }
            }
          }
        }
      }
    ]
  },
  "variables": [
    { "name": "person", "id": "v1" }
  ]
}"#;

/// An LLM query built from a prompt template and a model, printed.
#[allow(dead_code)]
pub const LLM_WORKSPACE_JSON: &str = r#"{
  "blocks": {
    "languageVersion": 0,
    "blocks": [
      {
        "type": "print_block",
        "id": "print1",
        "x": 10,
        "y": 10,
        "inputs": {
          "VALUE": {
            "block": {
              "type": "llm_query",
              "id": "query1",
              "inputs": {
                "MODEL": {
                  "block": {
                    "type": "create_model",
                    "id": "model1",
                    "fields": { "PROVIDER": "openai" },
                    "inputs": {
                      "MODEL_NAME": { "shadow": { "type": "text", "id": "mn", "fields": { "TEXT": "gpt-4o" } } }
                    }
                  }
                },
                "TEMPLATE": {
                  "block": {
                    "type": "create_chat_prompt_template",
                    "id": "tpl1",
                    "inputs": {
                      "MESSAGES": {
                        "block": {
                          "type": "create_message",
                          "id": "m1",
                          "fields": { "MESSAGE_TYPE": "human" },
                          "inputs": {
                            "CONTENT": { "block": { "type": "text", "id": "c1", "fields": { "TEXT": "Tell me about {topic}" } } }
                          }
                        }
                      }
                    }
                  }
                },
                "VARIABLES": {
                  "block": {
                    "type": "create_dict",
                    "id": "vars1",
                    "inputs": {
                      "PAIRS": {
                        "block": {
                          "type": "dict_pair",
                          "id": "p1",
                          "inputs": {
                            "KEY": { "block": { "type": "text", "id": "k1", "fields": { "TEXT": "topic" } } },
                            "VALUE": { "block": { "type": "text", "id": "v1", "fields": { "TEXT": "owls" } } }
                          }
                        }
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    ]
  }
}"#;
