use std::fmt;

/// Defines the closed set of block kinds together with their canonical type names.
macro_rules! define_block_kinds {
    ( $( $variant:ident => $type_name:literal ),* $(,)? ) => {
        /// Every block kind the transpiler knows how to emit.
        ///
        /// Adding a kind here forces a definition in the catalogue (checked when
        /// the registry is built) and an arm in the emitter (checked by the compiler).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BlockKind {
            $( $variant, )*
        }

        impl BlockKind {
            /// All kinds, in declaration order.
            pub const ALL: &'static [BlockKind] = &[ $( BlockKind::$variant, )* ];

            /// The canonical type name used in workspace documents.
            pub const fn type_name(self) -> &'static str {
                match self {
                    $( BlockKind::$variant => $type_name, )*
                }
            }

            /// Looks a kind up by its canonical type name.
            pub fn from_type_name(name: &str) -> Option<BlockKind> {
                match name {
                    $( $type_name => Some(BlockKind::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

define_block_kinds! {
    // Built-in value blocks
    Text => "text",
    Number => "math_number",
    Boolean => "logic_boolean",
    VariableGet => "variables_get",
    VariableSet => "variables_set",

    // Text and I/O
    AddText => "add_text",
    Input => "input_block",
    Print => "print_block",

    // Dictionaries
    CreateDict => "create_dict",
    DictPair => "dict_pair",
    DictLength => "dict_length",
    DictIsEmpty => "dict_is_empty",
    DictHasKey => "dict_has_key",
    DictKeys => "dict_keys",
    DictGet => "dict_get",
    DictDelete => "dict_delete",
    DictAdd => "dict_add",

    // LLM chain construction
    LlmQuery => "llm_query",
    CreateModel => "create_model",
    CreateMessage => "create_message",
    CreateChatPromptTemplate => "create_chat_prompt_template",
    CreateChain => "create_chain",
    InvokeChain => "invoke_chain",
    CreateRunnableWithMessageHistory => "create_runnable_with_message_history",
    CreateMessagesPlaceholder => "create_messages_placeholder",
    InvokeRunnableWithMessageHistory => "invoke_runnable_with_message_history",
}

impl BlockKind {
    /// Position of this kind in [`BlockKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Toolbox category a block type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Text,
    Math,
    Logic,
    Variables,
    Io,
    Dictionary,
    Llm,
}

impl Category {
    pub const fn name(self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Math => "Math",
            Category::Logic => "Logic",
            Category::Variables => "Variables",
            Category::Io => "I/O",
            Category::Dictionary => "Dictionary",
            Category::Llm => "LLM",
        }
    }

    /// Default hue used by the editor for blocks of this category.
    pub const fn colour(self) -> u16 {
        match self {
            Category::Text | Category::Io => 160,
            Category::Math => 230,
            Category::Logic => 210,
            Category::Variables => 330,
            Category::Dictionary | Category::Llm => 290,
        }
    }
}
