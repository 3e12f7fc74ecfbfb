//! Built-in block definitions.
//!
//! Socket defaults declared here are the only source of the placeholder text the
//! emitter substitutes for unconnected inputs, and of the defaults quoted in tooltips.

use super::definition::{BlockType, Check, FieldDef, PyImport, SocketDef};
use super::{BlockKind, Category};
use crate::ast::Order;
use ahash::AHashMap;

pub const CHAT_OPENAI: PyImport = PyImport::new("langchain_openai", "ChatOpenAI");
pub const CHAT_PROMPT_TEMPLATE: PyImport =
    PyImport::new("langchain_core.prompts", "ChatPromptTemplate");
pub const MESSAGES_PLACEHOLDER: PyImport =
    PyImport::new("langchain_core.prompts", "MessagesPlaceholder");
pub const STR_OUTPUT_PARSER: PyImport =
    PyImport::new("langchain_core.output_parsers", "StrOutputParser");
pub const RUNNABLE_WITH_MESSAGE_HISTORY: PyImport =
    PyImport::new("langchain_core.runnables.history", "RunnableWithMessageHistory");

const STRING: &[&str] = &["String"];
const NUMBER: &[&str] = &["Number"];
const BOOLEAN: &[&str] = &["Boolean"];
const ARRAY: &[&str] = &["Array"];
const DICT_PAIR: &[&str] = &["DictPair"];
const MESSAGE: &[&str] = &["Message"];

/// Inserts every built-in definition into `registry`.
pub(super) fn register_default_blocks(registry: &mut AHashMap<BlockKind, BlockType>) {
    for definition in default_blocks() {
        registry.insert(definition.kind, definition);
    }
}

fn default_blocks() -> Vec<BlockType> {
    vec![
        // Built-in value blocks
        BlockType::new(BlockKind::Text, Category::Text, "%1")
            .field(FieldDef::Text {
                name: "TEXT",
                default: "",
            })
            .output(Check::Types(STRING))
            .tooltip("A letter, word, or line of text."),
        BlockType::new(BlockKind::Number, Category::Math, "%1")
            .field(FieldDef::Number {
                name: "NUM",
                default: 0.0,
            })
            .output(Check::Types(NUMBER))
            .tooltip("A number."),
        BlockType::new(BlockKind::Boolean, Category::Logic, "%1")
            .field(FieldDef::Dropdown {
                name: "BOOL",
                options: &[("true", "TRUE"), ("false", "FALSE")],
            })
            .output(Check::Types(BOOLEAN))
            .tooltip("Returns either true or false."),
        BlockType::new(BlockKind::VariableGet, Category::Variables, "%1")
            .field(FieldDef::Variable {
                name: "VAR",
                default_name: "item",
            })
            .output(Check::Any)
            .tooltip("Returns the value of this variable."),
        BlockType::new(BlockKind::VariableSet, Category::Variables, "set %1 to %2")
            .field(FieldDef::Variable {
                name: "VAR",
                default_name: "item",
            })
            .socket(SocketDef::value("VALUE").defaults_to("0"))
            .statement(Check::Any)
            .tooltip("Sets this variable to be equal to the input."),
        // Text and I/O
        BlockType::new(BlockKind::AddText, Category::Text, "Add text %1")
            .socket(SocketDef::value("TEXT").check(STRING).defaults_to("''"))
            .statement(Check::Any)
            .tooltip("Add text to the output."),
        BlockType::new(BlockKind::Input, Category::Io, "input %1")
            .socket(SocketDef::value("MESSAGE").check(STRING).defaults_to("\"\""))
            .output(Check::Types(STRING))
            .tooltip("Get user input with a message prompt"),
        BlockType::new(BlockKind::Print, Category::Io, "print %1")
            .socket(SocketDef::value("VALUE").defaults_to("\"\""))
            .statement(Check::Any)
            .tooltip("Print value to standard output"),
        // Dictionaries
        BlockType::new(BlockKind::CreateDict, Category::Dictionary, "create dictionary %1 %2")
            .socket(SocketDef::dummy())
            .socket(SocketDef::statement("PAIRS").check(DICT_PAIR).defaults_to("{}"))
            .output(Check::Any)
            .tooltip("Create a dictionary with key-value pairs"),
        BlockType::new(BlockKind::DictPair, Category::Dictionary, "key: %1 value: %2")
            .socket(SocketDef::value("KEY").check(STRING).defaults_to("\"\""))
            .socket(SocketDef::value("VALUE").defaults_to("None"))
            .statement(Check::Types(DICT_PAIR))
            .tooltip("A key-value pair for dictionary"),
        BlockType::new(BlockKind::DictLength, Category::Dictionary, "length of %1")
            .socket(SocketDef::value("DICT").defaults_to("{}"))
            .output(Check::Types(NUMBER))
            .tooltip("Returns the number of items in the dictionary"),
        BlockType::new(BlockKind::DictIsEmpty, Category::Dictionary, "%1 is empty")
            .socket(SocketDef::value("DICT").defaults_to("{}"))
            .output(Check::Types(BOOLEAN))
            .tooltip("Returns true if the dictionary is empty"),
        BlockType::new(BlockKind::DictHasKey, Category::Dictionary, "%1 has key %2")
            .socket(SocketDef::value("DICT").defaults_to("{}"))
            .socket(SocketDef::value("KEY").check(STRING).defaults_to("\"\""))
            .output(Check::Types(BOOLEAN))
            .tooltip("Returns true if the dictionary contains the specified key"),
        BlockType::new(BlockKind::DictKeys, Category::Dictionary, "keys of %1")
            .socket(SocketDef::value("DICT").defaults_to("{}"))
            .output(Check::Types(ARRAY))
            .tooltip("Returns a list of all keys in the dictionary"),
        BlockType::new(BlockKind::DictGet, Category::Dictionary, "get %1 from %2")
            .socket(SocketDef::value("KEY").check(STRING).defaults_to("\"\""))
            .socket(SocketDef::value("DICT").defaults_to("{}"))
            .output(Check::Any)
            .tooltip("Returns the value for the specified key"),
        BlockType::new(BlockKind::DictDelete, Category::Dictionary, "delete key %1 from %2")
            .socket(SocketDef::value("KEY").check(STRING).defaults_to("\"\""))
            .socket(SocketDef::value("DICT").defaults_to("{}"))
            .statement(Check::Any)
            .tooltip("Deletes the specified key from the dictionary"),
        BlockType::new(
            BlockKind::DictAdd,
            Category::Dictionary,
            "in %1 set key %2 to value %3",
        )
        .socket(SocketDef::value("DICT").defaults_to("{}"))
        .socket(SocketDef::value("KEY").check(STRING).defaults_to("\"\""))
        .socket(SocketDef::value("VALUE").defaults_to("None"))
        .statement(Check::Any)
        .tooltip("Adds or updates a key-value pair in the dictionary"),
        // LLM chain construction
        BlockType::new(
            BlockKind::LlmQuery,
            Category::Llm,
            "LLM Query %1 model: %2 %3 template: %4 %5 variables: %6 %7 optional_parser: %8",
        )
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("MODEL").defaults_to("None"))
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("TEMPLATE").defaults_to("None"))
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("VARIABLES").defaults_to("{}"))
        .socket(SocketDef::dummy())
        .socket(
            SocketDef::value("OPTIONAL_PARSER")
                .defaults_to_expression("StrOutputParser()", Order::FunctionCall)
                .requires(STR_OUTPUT_PARSER),
        )
        .output(Check::Types(STRING))
        .tooltip("Query LLM using LangChain with model, template, variables, and optional parser"),
        BlockType::new(
            BlockKind::CreateModel,
            Category::Llm,
            "Create %1 model %2 model name: %3 %4 optional_temperature: %5",
        )
        .field(FieldDef::Dropdown {
            name: "PROVIDER",
            options: &[("OpenAI", "openai")],
        })
        .socket(SocketDef::dummy())
        .socket(
            SocketDef::value("MODEL_NAME")
                .check(STRING)
                .defaults_to("\"gpt-3.5-turbo\""),
        )
        .socket(SocketDef::dummy())
        .socket(
            SocketDef::value("OPTIONAL_TEMPERATURE")
                .check(NUMBER)
                .defaults_to("0.7"),
        )
        .output(Check::Any)
        .imports(&[CHAT_OPENAI])
        .tooltip("Create an LLM model instance with optional temperature setting"),
        BlockType::new(
            BlockKind::CreateMessage,
            Category::Llm,
            "Create %1 %2 content: %3",
        )
        .field(FieldDef::Dropdown {
            name: "MESSAGE_TYPE",
            options: &[("system", "system"), ("human", "human"), ("ai", "ai")],
        })
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("CONTENT").check(STRING).defaults_to("\"\""))
        .statement(Check::Types(MESSAGE))
        .tooltip("Create a message for LLM conversation"),
        BlockType::new(
            BlockKind::CreateChatPromptTemplate,
            Category::Llm,
            "Create ChatPromptTemplate %1 %2",
        )
        .socket(SocketDef::dummy())
        .socket(SocketDef::statement("MESSAGES").check(MESSAGE).defaults_to("[]"))
        .output(Check::Any)
        .imports(&[CHAT_PROMPT_TEMPLATE])
        .tooltip("Create a ChatPromptTemplate from multiple messages"),
        BlockType::new(
            BlockKind::CreateChain,
            Category::Llm,
            "Create Chain %1 template: %2 %3 model: %4 %5 optional_parser: %6",
        )
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("TEMPLATE").defaults_to("None"))
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("MODEL").defaults_to("None"))
        .socket(SocketDef::dummy())
        .socket(
            SocketDef::value("OPTIONAL_PARSER")
                .defaults_to_expression("StrOutputParser()", Order::FunctionCall)
                .requires(STR_OUTPUT_PARSER),
        )
        .output(Check::Any)
        .tooltip("Create a LangChain chain with template, model, and optional parser"),
        BlockType::new(
            BlockKind::InvokeChain,
            Category::Llm,
            "Invoke Chain %1 chain: %2 %3 variables: %4",
        )
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("CHAIN").defaults_to("None"))
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("VARIABLES").defaults_to("{}"))
        .output(Check::Types(STRING))
        .tooltip("Invoke a LangChain chain with variables"),
        BlockType::new(
            BlockKind::CreateRunnableWithMessageHistory,
            Category::Llm,
            "Create RunnableWithMessageHistory %1 chain: %2 \
             optional_get_session_history: %3 \
             optional_input_messages_key: %4 \
             optional_history_messages_key: %5",
        )
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("CHAIN").defaults_to("None"))
        .socket(SocketDef::value("OPTIONAL_GET_SESSION_HISTORY").defaults_to("get_session_history"))
        .socket(
            SocketDef::value("OPTIONAL_INPUT_MESSAGES_KEY")
                .check(STRING)
                .defaults_to("\"input\""),
        )
        .socket(
            SocketDef::value("OPTIONAL_HISTORY_MESSAGES_KEY")
                .check(STRING)
                .defaults_to("\"history\""),
        )
        .output(Check::Any)
        .imports(&[RUNNABLE_WITH_MESSAGE_HISTORY])
        .tooltip("Create a RunnableWithMessageHistory with chain and optional history configuration"),
        BlockType::new(
            BlockKind::CreateMessagesPlaceholder,
            Category::Llm,
            "Create MessagesPlaceholder %1 optional_variable_name: %2",
        )
        .socket(SocketDef::dummy())
        .socket(
            SocketDef::value("OPTIONAL_VARIABLE_NAME")
                .check(STRING)
                .defaults_to("\"history\""),
        )
        .statement(Check::Types(MESSAGE))
        .imports(&[MESSAGES_PLACEHOLDER])
        .tooltip("Create a MessagesPlaceholder with optional variable name"),
        BlockType::new(
            BlockKind::InvokeRunnableWithMessageHistory,
            Category::Llm,
            "Invoke RunnableWithMessageHistory %1 runnable: %2 %3 variables: %4 %5 config: %6",
        )
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("RUNNABLE").defaults_to("None"))
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("VARIABLES").defaults_to("{}"))
        .socket(SocketDef::dummy())
        .socket(SocketDef::value("CONFIG").defaults_to("{}"))
        .output(Check::Types(STRING))
        .tooltip("Invoke a RunnableWithMessageHistory with variables and a session config"),
    ]
}
