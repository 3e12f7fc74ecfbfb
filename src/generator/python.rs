//! Python emission for every block kind.

use super::context::EmitContext;
use super::names::{format_number, quote};
use crate::ast::{Emission, Order};
use crate::error::EmitError;
use crate::schema::BlockKind;
use crate::workspace::Block;

/// Emits a single block. Child sockets are resolved recursively through `ctx`.
pub(super) fn emit_block(ctx: &mut EmitContext<'_>, block: &Block) -> Result<Emission, EmitError> {
    let emission = match block.kind {
        BlockKind::Text => Emission::expression(quote(&ctx.field_text(block, "TEXT")?), Order::Atomic),
        BlockKind::Number => {
            let (code, order) = format_number(ctx.field_number(block, "NUM")?);
            Emission::expression(code, order)
        }
        BlockKind::Boolean => {
            let code = match ctx.field_text(block, "BOOL")?.as_str() {
                "TRUE" => "True",
                "FALSE" => "False",
                other => {
                    return Err(EmitError::InvalidField {
                        block_id: block.id.clone(),
                        field: "BOOL".to_string(),
                        message: format!("'{}' is not a boolean", other),
                    });
                }
            };
            Emission::expression(code, Order::Atomic)
        }
        BlockKind::VariableGet => Emission::expression(ctx.variable_name(block, "VAR")?, Order::Atomic),
        BlockKind::VariableSet => {
            let name = ctx.variable_name(block, "VAR")?;
            let value = ctx.value_to_code(block, "VALUE", Order::None)?;
            Emission::statement(format!("{} = {}\n", name, value))
        }

        BlockKind::AddText => {
            let text = ctx.value_to_code(block, "TEXT", Order::None)?;
            Emission::statement(format!("# Add text to output\nprint({})\n", text))
        }
        BlockKind::Input => {
            let message = ctx.value_to_code(block, "MESSAGE", Order::None)?;
            Emission::expression(format!("input({})", message), Order::FunctionCall)
        }
        BlockKind::Print => {
            let value = ctx.value_to_code(block, "VALUE", Order::None)?;
            Emission::statement(format!("print({})\n", value))
        }

        BlockKind::CreateDict => {
            let items = ctx.statement_items(block, "PAIRS")?;
            let code = if items.is_empty() {
                ctx.socket_default(block, "PAIRS")
            } else {
                format!("{{{}}}", items.join(", "))
            };
            Emission::expression(code, Order::Atomic)
        }
        BlockKind::DictPair => {
            let key = ctx.value_to_code(block, "KEY", Order::None)?;
            let value = ctx.value_to_code(block, "VALUE", Order::None)?;
            Emission::item(format!("{}: {}", key, value))
        }
        BlockKind::DictLength => {
            let dict = ctx.value_to_code(block, "DICT", Order::None)?;
            Emission::expression(format!("len({})", dict), Order::FunctionCall)
        }
        BlockKind::DictIsEmpty => {
            let dict = ctx.value_to_code(block, "DICT", Order::None)?;
            Emission::expression(format!("len({}) == 0", dict), Order::Relational)
        }
        BlockKind::DictHasKey => {
            let key = ctx.value_to_code(block, "KEY", Order::BitwiseOr)?;
            let dict = ctx.value_to_code(block, "DICT", Order::BitwiseOr)?;
            Emission::expression(format!("{} in {}", key, dict), Order::Relational)
        }
        BlockKind::DictKeys => {
            let dict = ctx.value_to_code(block, "DICT", Order::Member)?;
            Emission::expression(format!("list({}.keys())", dict), Order::FunctionCall)
        }
        BlockKind::DictGet => {
            let dict = ctx.value_to_code(block, "DICT", Order::Member)?;
            let key = ctx.value_to_code(block, "KEY", Order::None)?;
            Emission::expression(format!("{}[{}]", dict, key), Order::Member)
        }
        BlockKind::DictDelete => {
            let dict = ctx.value_to_code(block, "DICT", Order::Member)?;
            let key = ctx.value_to_code(block, "KEY", Order::None)?;
            Emission::statement(format!("del {}[{}]\n", dict, key))
        }
        BlockKind::DictAdd => {
            let dict = ctx.value_to_code(block, "DICT", Order::Member)?;
            let key = ctx.value_to_code(block, "KEY", Order::None)?;
            let value = ctx.value_to_code(block, "VALUE", Order::None)?;
            Emission::statement(format!("{}[{}] = {}\n", dict, key, value))
        }

        BlockKind::LlmQuery => {
            let pipeline = pipe(ctx, block, ["TEMPLATE", "MODEL", "OPTIONAL_PARSER"])?;
            let variables = ctx.value_to_code(block, "VARIABLES", Order::None)?;
            Emission::expression(
                format!(
                    "{}.invoke({})",
                    Order::BitwiseOr.wrap(pipeline, Order::Member),
                    variables
                ),
                Order::FunctionCall,
            )
        }
        BlockKind::CreateModel => {
            let provider = ctx.field_text(block, "PROVIDER")?;
            if provider != "openai" {
                return Err(EmitError::InvalidField {
                    block_id: block.id.clone(),
                    field: "PROVIDER".to_string(),
                    message: format!("unsupported provider '{}'", provider),
                });
            }
            let model = ctx.value_to_code(block, "MODEL_NAME", Order::None)?;
            let temperature = ctx.value_to_code(block, "OPTIONAL_TEMPERATURE", Order::None)?;
            Emission::expression(
                format!("ChatOpenAI(model={}, temperature={})", model, temperature),
                Order::FunctionCall,
            )
        }
        BlockKind::CreateMessage => {
            let message_type = ctx.field_text(block, "MESSAGE_TYPE")?;
            let content = ctx.value_to_code(block, "CONTENT", Order::None)?;
            Emission::item(format!("({}, {})", quote(&message_type), content))
        }
        BlockKind::CreateChatPromptTemplate => {
            let items = ctx.statement_items(block, "MESSAGES")?;
            let messages = if items.is_empty() {
                ctx.socket_default(block, "MESSAGES")
            } else {
                format!("[{}]", items.join(", "))
            };
            Emission::expression(
                format!("ChatPromptTemplate.from_messages({})", messages),
                Order::FunctionCall,
            )
        }
        BlockKind::CreateChain => {
            Emission::expression(pipe(ctx, block, ["TEMPLATE", "MODEL", "OPTIONAL_PARSER"])?, Order::BitwiseOr)
        }
        BlockKind::InvokeChain => {
            let chain = ctx.value_to_code(block, "CHAIN", Order::Member)?;
            let variables = ctx.value_to_code(block, "VARIABLES", Order::None)?;
            Emission::expression(format!("{}.invoke({})", chain, variables), Order::FunctionCall)
        }
        BlockKind::CreateRunnableWithMessageHistory => {
            let chain = ctx.value_to_code(block, "CHAIN", Order::None)?;
            let history = ctx.value_to_code(block, "OPTIONAL_GET_SESSION_HISTORY", Order::None)?;
            let input_key = ctx.value_to_code(block, "OPTIONAL_INPUT_MESSAGES_KEY", Order::None)?;
            let history_key = ctx.value_to_code(block, "OPTIONAL_HISTORY_MESSAGES_KEY", Order::None)?;
            Emission::expression(
                format!(
                    "RunnableWithMessageHistory({}, {}, input_messages_key={}, history_messages_key={})",
                    chain, history, input_key, history_key
                ),
                Order::FunctionCall,
            )
        }
        BlockKind::CreateMessagesPlaceholder => {
            let name = ctx.value_to_code(block, "OPTIONAL_VARIABLE_NAME", Order::None)?;
            Emission::item(format!("MessagesPlaceholder(variable_name={})", name))
        }
        BlockKind::InvokeRunnableWithMessageHistory => {
            let runnable = ctx.value_to_code(block, "RUNNABLE", Order::Member)?;
            let variables = ctx.value_to_code(block, "VARIABLES", Order::None)?;
            let config = ctx.value_to_code(block, "CONFIG", Order::None)?;
            Emission::expression(
                format!("{}.invoke({}, config={})", runnable, variables, config),
                Order::FunctionCall,
            )
        }
    };
    Ok(emission)
}

/// `a | b | c` over the given sockets. `|` is left-associative, so only the
/// leftmost operand may itself be an unparenthesized pipe.
fn pipe<const N: usize>(
    ctx: &mut EmitContext<'_>,
    block: &Block,
    sockets: [&str; N],
) -> Result<String, EmitError> {
    let mut operands = Vec::with_capacity(N);
    for (i, socket) in sockets.into_iter().enumerate() {
        let required = if i == 0 { Order::BitwiseOr } else { Order::BitwiseXor };
        operands.push(ctx.value_to_code(block, socket, required)?);
    }
    Ok(operands.join(" | "))
}
