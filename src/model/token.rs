//! Compiled instruction tokens
//!
//! Tokens arrive already decoded from the package; this module only knows
//! how to print them and how to walk their immediate sub-expressions.

use super::package::{ObjectRef, Vector};
use crate::decompiler::DecompileContext;
use crate::error::Result as DecompilerResult;
use crate::format::format_float;
use serde::{Deserialize, Serialize};

/// `next_offset` value marking the `default:` label of a switch
pub const CASE_DEFAULT: u16 = 0xFFFF;

/// A token at its byte offset in the function's bytecode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub offset: u32,
    pub token: Token,
}

impl Instruction {
    pub fn new(offset: u32, token: Token) -> Self {
        Self { offset, token }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    LocalVariable(String),
    InstanceVariable(String),
    DefaultVariable(String),
    SelfRef,
    NoObject,
    Nothing,
    IntConst(i32),
    ByteConst(u8),
    FloatConst(f32),
    BoolConst(bool),
    StringConst(String),
    NameConst(String),
    ObjectConst(ObjectRef),
    VectorConst(Vector),
    RotatorConst {
        pitch: i32,
        yaw: i32,
        roll: i32,
    },
    Let {
        lhs: Box<Token>,
        rhs: Box<Token>,
    },
    Context {
        object: Box<Token>,
        member: Box<Token>,
    },
    ArrayElement {
        array: Box<Token>,
        index: Box<Token>,
    },
    FunctionCall {
        name: String,
        params: Vec<Token>,
    },
    GlobalFunction {
        name: String,
        params: Vec<Token>,
    },
    BinaryOperator {
        op: String,
        lhs: Box<Token>,
        rhs: Box<Token>,
    },
    PreOperator {
        op: String,
        operand: Box<Token>,
    },
    PostOperator {
        op: String,
        operand: Box<Token>,
    },
    DynamicCast {
        class: String,
        value: Box<Token>,
    },
    MetaCast {
        class: String,
        value: Box<Token>,
    },
    Return(Box<Token>),
    Stop,
    Jump {
        target: u32,
    },
    JumpIfNot {
        target: u32,
        condition: Box<Token>,
    },
    Iterator {
        expression: Box<Token>,
        end_of_loop: u32,
    },
    IteratorNext,
    IteratorPop,
    Switch {
        expression: Box<Token>,
    },
    Case {
        next_offset: u16,
        #[serde(default)]
        value: Option<Box<Token>>,
    },
}

impl Token {
    /// `return;` with no value, the terminator the compiler appends
    pub fn is_empty_return(&self) -> bool {
        matches!(self, Token::Return(value) if **value == Token::Nothing)
    }

    pub fn is_default_case(&self) -> bool {
        matches!(self, Token::Case { next_offset, .. } if *next_offset == CASE_DEFAULT)
    }

    /// Control tokens that only make sense once structured
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Token::Jump { .. }
                | Token::JumpIfNot { .. }
                | Token::Iterator { .. }
                | Token::Switch { .. }
                | Token::Case { .. }
        )
    }

    /// Immediate sub-expressions, in field order
    pub fn children(&self) -> Vec<&Token> {
        match self {
            Token::Let { lhs, rhs } | Token::BinaryOperator { lhs, rhs, .. } => {
                vec![&**lhs, &**rhs]
            }
            Token::Context { object, member } => vec![&**object, &**member],
            Token::ArrayElement { array, index } => vec![&**array, &**index],
            Token::FunctionCall { params, .. } | Token::GlobalFunction { params, .. } => {
                params.iter().collect()
            }
            Token::PreOperator { operand, .. } | Token::PostOperator { operand, .. } => {
                vec![&**operand]
            }
            Token::DynamicCast { value, .. } | Token::MetaCast { value, .. } => vec![&**value],
            Token::Return(value) => vec![&**value],
            Token::JumpIfNot { condition, .. } => vec![&**condition],
            Token::Iterator { expression, .. } | Token::Switch { expression } => {
                vec![&**expression]
            }
            Token::Case { value, .. } => value.iter().map(|v| &**v).collect(),
            _ => Vec::new(),
        }
    }

    /// Source text of this token
    pub fn render(&self, ctx: &DecompileContext<'_>) -> DecompilerResult<String> {
        Ok(match self {
            Token::LocalVariable(name) | Token::InstanceVariable(name) => name.clone(),
            Token::DefaultVariable(name) => format!("Default.{}", name),
            Token::SelfRef => "self".to_string(),
            Token::NoObject => "None".to_string(),
            Token::Nothing => String::new(),
            Token::IntConst(value) => value.to_string(),
            Token::ByteConst(value) => value.to_string(),
            Token::FloatConst(value) => format_float(*value),
            Token::BoolConst(true) => "True".to_string(),
            Token::BoolConst(false) => "False".to_string(),
            Token::StringConst(value) => format!("\"{}\"", value),
            Token::NameConst(value) => format!("'{}'", value),
            Token::ObjectConst(reference) => ctx.link_to(*reference)?,
            Token::VectorConst(v) => format!(
                "vect({},{},{})",
                format_float(v.x),
                format_float(v.y),
                format_float(v.z)
            ),
            Token::RotatorConst { pitch, yaw, roll } => format!("rot({},{},{})", pitch, yaw, roll),
            Token::Let { lhs, rhs } => format!("{} = {}", lhs.render(ctx)?, rhs.render(ctx)?),
            Token::Context { object, member } => {
                format!("{}.{}", object.render(ctx)?, member.render(ctx)?)
            }
            Token::ArrayElement { array, index } => {
                format!("{}[{}]", array.render(ctx)?, index.render(ctx)?)
            }
            Token::FunctionCall { name, params } => {
                format!("{}({})", name, render_params(params, ctx)?)
            }
            Token::GlobalFunction { name, params } => {
                format!("Global.{}({})", name, render_params(params, ctx)?)
            }
            Token::BinaryOperator { op, lhs, rhs } => format!(
                "{} {} {}",
                lhs.render_operand(ctx)?,
                op,
                rhs.render_operand(ctx)?
            ),
            Token::PreOperator { op, operand } => {
                format!("{}{}", op, operand.render_operand(ctx)?)
            }
            Token::PostOperator { op, operand } => {
                format!("{}{}", operand.render_operand(ctx)?, op)
            }
            Token::DynamicCast { class, value } => format!("{}({})", class, value.render(ctx)?),
            Token::MetaCast { class, value } => {
                format!("class<{}>({})", class, value.render(ctx)?)
            }
            Token::Return(value) => match **value {
                Token::Nothing => "return".to_string(),
                _ => format!("return {}", value.render(ctx)?),
            },
            Token::Stop => "stop".to_string(),
            Token::Jump { target } => format!("jump 0x{:04X}", target),
            Token::JumpIfNot { target, condition } => format!(
                "if ( !({}) ) jump 0x{:04X}",
                condition.render(ctx)?,
                target
            ),
            Token::Iterator {
                expression,
                end_of_loop,
            } => format!(
                "iterator {} end 0x{:04X}",
                expression.render(ctx)?,
                end_of_loop
            ),
            Token::IteratorNext => "iteratornext".to_string(),
            Token::IteratorPop => "iteratorpop".to_string(),
            Token::Switch { expression } => format!("switch ( {} )", expression.render(ctx)?),
            Token::Case { value, .. } => match value {
                Some(value) if !self.is_default_case() => format!("case {}:", value.render(ctx)?),
                _ => "default:".to_string(),
            },
        })
    }

    /// Nested binary expressions are parenthesized as operands
    fn render_operand(&self, ctx: &DecompileContext<'_>) -> DecompilerResult<String> {
        match self {
            Token::BinaryOperator { .. } => Ok(format!("({})", self.render(ctx)?)),
            _ => self.render(ctx),
        }
    }
}

fn render_params(params: &[Token], ctx: &DecompileContext<'_>) -> DecompilerResult<String> {
    let rendered = params
        .iter()
        .map(|p| p.render(ctx))
        .collect::<DecompilerResult<Vec<_>>>()?;
    Ok(rendered.join(", "))
}
