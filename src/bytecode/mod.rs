//! Function body reconstruction
//!
//! A compiled body is a flat offset -> token map whose only control flow is
//! conditional and unconditional jumps. The recognizer regroups it into a
//! nested statement tree; nothing is rewritten, so every original offset
//! can still be found in the tree.

pub mod recognizer;
pub mod render;

pub use recognizer::structure;

use crate::decompiler::DecompileContext;
use crate::model::{Instruction, Token};
use crate::DecompilerResult;
use std::collections::BTreeMap;

/// Ordered offset -> entry sequence
pub type Code = BTreeMap<u32, BytecodeEntry>;

/// One statement of the reconstructed tree
#[derive(Debug, Clone, PartialEq)]
pub enum BytecodeEntry {
    /// Unstructured instruction, printed as-is
    Token(Token),
    /// Switch case exit that replaced an unconditional jump
    Break,
    If(If),
    While(While),
    DoUntil(DoUntil),
    For(For),
    ForEach(ForEach),
    Switch(Switch),
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Token,
    pub body: Code,
    pub else_branch: Option<ElseBranch>,
}

/// `else` part of an if, entered past the jump that ends the then-part
#[derive(Debug, Clone, PartialEq)]
pub struct ElseBranch {
    pub jump: u32,
    pub body: Code,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Token,
    pub body: Code,
    /// Offset of the discarded jump back to the loop head
    pub back_jump: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoUntil {
    /// Condition together with the offset of its backward branch
    pub condition: Instruction,
    pub body: Code,
}

#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub init: Option<Instruction>,
    pub condition: Option<Instruction>,
    pub post: Option<Instruction>,
    pub body: Code,
    pub back_jump: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForEach {
    pub iterator: Token,
    pub body: Code,
    /// Trailing iterator-next folded out of the body
    pub next: Option<u32>,
    /// Loop end marker removed from the parent
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub expression: Token,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Offset of the case label instruction
    pub offset: u32,
    pub label: CaseLabel,
    pub body: Code,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseLabel {
    Value(Token),
    Default,
}

impl BytecodeEntry {
    /// Original offsets covered by this entry when stored at `at`, in
    /// bytecode order
    pub fn offsets(&self, at: u32, out: &mut Vec<u32>) {
        match self {
            BytecodeEntry::Token(_) | BytecodeEntry::Break => out.push(at),
            BytecodeEntry::If(node) => {
                out.push(at);
                collect_offsets(&node.body, out);
                if let Some(else_branch) = &node.else_branch {
                    out.push(else_branch.jump);
                    collect_offsets(&else_branch.body, out);
                }
            }
            BytecodeEntry::While(node) => {
                out.push(at);
                collect_offsets(&node.body, out);
                out.push(node.back_jump);
            }
            BytecodeEntry::DoUntil(node) => {
                collect_offsets(&node.body, out);
                out.push(node.condition.offset);
            }
            BytecodeEntry::For(node) => {
                out.extend(node.init.iter().map(|i| i.offset));
                out.extend(node.condition.iter().map(|i| i.offset));
                collect_offsets(&node.body, out);
                out.extend(node.post.iter().map(|i| i.offset));
                out.push(node.back_jump);
            }
            BytecodeEntry::ForEach(node) => {
                out.push(at);
                collect_offsets(&node.body, out);
                out.extend(node.next);
                out.push(node.end);
            }
            BytecodeEntry::Switch(node) => {
                out.push(at);
                for case in &node.cases {
                    out.push(case.offset);
                    collect_offsets(&case.body, out);
                }
            }
        }
    }
}

fn collect_offsets(code: &Code, out: &mut Vec<u32>) {
    for (at, entry) in code {
        entry.offsets(*at, out);
    }
}

/// Flatten a tree back to the offsets it was built from
pub fn flatten_offsets(code: &Code) -> Vec<u32> {
    let mut out = Vec::new();
    collect_offsets(code, &mut out);
    out
}

/// Wrap raw instructions as unstructured entries
pub fn to_code(instructions: &[Instruction]) -> Code {
    instructions
        .iter()
        .map(|i| (i.offset, BytecodeEntry::Token(i.token.clone())))
        .collect()
}

/// Structure a function body, dropping the compiler's trailing `return;`
pub fn decompile_code(instructions: &[Instruction]) -> Code {
    let mut code = to_code(instructions);
    if let Some(entry) = code.last_entry() {
        if matches!(entry.get(), BytecodeEntry::Token(token) if token.is_empty_return()) {
            entry.remove();
        }
    }
    structure(code)
}

/// Decompile a function body to statement lines at `indent`
pub fn decompile_bytecode(
    instructions: &[Instruction],
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<String> {
    let code = decompile_code(instructions);
    let mut out = String::new();
    render::write_code(&mut out, &code, ctx, indent)?;
    Ok(out)
}
