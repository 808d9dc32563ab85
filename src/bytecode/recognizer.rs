//! Control flow recognition
//!
//! Each rule looks for the jump shape one source construct compiles to and
//! collapses the covered range into a structured node. Rules run in a fixed
//! order over the whole sequence; rounds repeat until one changes nothing.
//! Bodies handed to a node go through the full rule list first, so nesting
//! is resolved bottom-up. Jumps no rule accounts for stay as plain tokens.

use super::{
    BytecodeEntry, CaseLabel, Code, DoUntil, ElseBranch, For, ForEach, If, Switch, SwitchCase,
    While,
};
use crate::model::{Instruction, Token};
use std::ops::Bound::{Excluded, Unbounded};

/// Recognition rules, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ForEach,
    DoUntil,
    IfElse,
    While,
    For,
    If,
    Switch,
}

/// `If` must come after `While`: a loop header is also a forward branch
pub const RULES: [Rule; 7] = [
    Rule::ForEach,
    Rule::DoUntil,
    Rule::IfElse,
    Rule::While,
    Rule::For,
    Rule::If,
    Rule::Switch,
];

/// Regroup a flat sequence into structured statements
pub fn structure(mut code: Code) -> Code {
    loop {
        let mut changed = false;
        for rule in RULES {
            changed |= rule.scan(&mut code);
        }
        if !changed {
            return code;
        }
    }
}

impl Rule {
    /// One left-to-right pass; true if anything was collapsed
    pub fn scan(self, code: &mut Code) -> bool {
        let mut changed = false;
        let mut cursor = code.keys().next().copied();
        while let Some(at) = cursor {
            if self.apply(code, at) {
                log::debug!("Recognized {:?} at 0x{:04X}", self, at);
                changed = true;
            }
            cursor = next_key(code, at);
        }
        changed
    }

    fn apply(self, code: &mut Code, at: u32) -> bool {
        match self {
            Rule::ForEach => for_each(code, at),
            Rule::DoUntil => do_until(code, at),
            Rule::IfElse => if_else(code, at),
            Rule::While => while_loop(code, at),
            Rule::For => promote_for(code, at),
            Rule::If => plain_if(code, at),
            Rule::Switch => switch(code, at),
        }
    }
}

fn next_key(code: &Code, at: u32) -> Option<u32> {
    code.range((Excluded(at), Unbounded)).next().map(|(k, _)| *k)
}

fn prev_key(code: &Code, before: u32) -> Option<u32> {
    code.range(..before).next_back().map(|(k, _)| *k)
}

fn token_at(code: &Code, at: u32) -> Option<&Token> {
    match code.get(&at) {
        Some(BytecodeEntry::Token(token)) => Some(token),
        _ => None,
    }
}

/// Remove and return the entries in `[start, end)`
fn take_range(code: &mut Code, start: u32, end: u32) -> Code {
    if start >= end {
        return Code::new();
    }
    let mut taken = code.split_off(&start);
    let mut rest = taken.split_off(&end);
    code.append(&mut rest);
    taken
}

/// Forward conditional branch at `at`: (target, condition)
fn forward_branch(code: &Code, at: u32) -> Option<(u32, Token)> {
    match token_at(code, at) {
        Some(Token::JumpIfNot { target, condition }) if *target > at => {
            Some((*target, (**condition).clone()))
        }
        _ => None,
    }
}

/// Unconditional jump right before `target`, after `at`: (offset, destination)
fn jump_before(code: &Code, at: u32, target: u32) -> Option<(u32, u32)> {
    let jump_at = prev_key(code, target).filter(|k| *k > at)?;
    match token_at(code, jump_at) {
        Some(Token::Jump { target }) => Some((jump_at, *target)),
        _ => None,
    }
}

fn for_each(code: &mut Code, at: u32) -> bool {
    let (iterator, end) = match token_at(code, at) {
        Some(Token::Iterator {
            expression,
            end_of_loop,
        }) if *end_of_loop > at && code.contains_key(end_of_loop) => {
            ((**expression).clone(), *end_of_loop)
        }
        _ => return false,
    };
    let mut body = take_range(code, at.saturating_add(1), end);
    code.remove(&end);
    let next = match body.last_key_value() {
        Some((k, BytecodeEntry::Token(Token::IteratorNext))) => Some(*k),
        _ => None,
    };
    if let Some(k) = next {
        body.remove(&k);
    }
    code.insert(
        at,
        BytecodeEntry::ForEach(ForEach {
            iterator,
            body: structure(body),
            next,
            end,
        }),
    );
    true
}

fn do_until(code: &mut Code, at: u32) -> bool {
    let (target, condition) = match token_at(code, at) {
        Some(Token::JumpIfNot { target, condition }) if *target < at => {
            (*target, (**condition).clone())
        }
        _ => return false,
    };
    let body = take_range(code, target, at);
    code.remove(&at);
    code.insert(
        target,
        BytecodeEntry::DoUntil(DoUntil {
            condition: Instruction::new(at, condition),
            body: structure(body),
        }),
    );
    true
}

fn if_else(code: &mut Code, at: u32) -> bool {
    let Some((target, condition)) = forward_branch(code, at) else {
        return false;
    };
    let (jump_at, else_end) = match jump_before(code, at, target) {
        Some((jump_at, destination)) if destination > target => (jump_at, destination),
        _ => return false,
    };
    let body = take_range(code, at + 1, jump_at);
    code.remove(&jump_at);
    let else_body = take_range(code, target, else_end);
    code.insert(
        at,
        BytecodeEntry::If(If {
            condition,
            body: structure(body),
            else_branch: Some(ElseBranch {
                jump: jump_at,
                body: structure(else_body),
            }),
        }),
    );
    true
}

fn while_loop(code: &mut Code, at: u32) -> bool {
    let Some((target, condition)) = forward_branch(code, at) else {
        return false;
    };
    let back_jump = match jump_before(code, at, target) {
        Some((jump_at, destination)) if destination == at => jump_at,
        _ => return false,
    };
    let body = take_range(code, at + 1, back_jump);
    code.remove(&back_jump);
    code.insert(
        at,
        BytecodeEntry::While(While {
            condition,
            body: structure(body),
            back_jump,
        }),
    );
    true
}

/// Exactly one immediate sub-expression of the statement before a loop is
/// repeated in the loop's last statement: the counter of a `for`
fn shares_one_subexpression(init: &Token, post: &Token) -> bool {
    let post_children = post.children();
    init.children()
        .into_iter()
        .filter(|child| post_children.contains(child))
        .count()
        == 1
}

fn promote_for(code: &mut Code, at: u32) -> bool {
    let Some(pre_at) = prev_key(code, at) else {
        return false;
    };
    let init = match (code.get(&pre_at), code.get(&at)) {
        (Some(BytecodeEntry::Token(pre)), Some(BytecodeEntry::While(node))) => {
            match node.body.last_key_value() {
                Some((_, BytecodeEntry::Token(post))) if shares_one_subexpression(pre, post) => {
                    pre.clone()
                }
                _ => return false,
            }
        }
        _ => return false,
    };
    let Some(BytecodeEntry::While(mut node)) = code.remove(&at) else {
        return false;
    };
    let Some((post_at, BytecodeEntry::Token(post))) = node.body.pop_last() else {
        return false;
    };
    code.insert(
        pre_at,
        BytecodeEntry::For(For {
            init: Some(Instruction::new(pre_at, init)),
            condition: Some(Instruction::new(at, node.condition)),
            post: Some(Instruction::new(post_at, post)),
            body: node.body,
            back_jump: node.back_jump,
        }),
    );
    true
}

fn plain_if(code: &mut Code, at: u32) -> bool {
    let Some((target, condition)) = forward_branch(code, at) else {
        return false;
    };
    let body = take_range(code, at + 1, target);
    code.insert(
        at,
        BytecodeEntry::If(If {
            condition,
            body: structure(body),
            else_branch: None,
        }),
    );
    true
}

fn switch(code: &mut Code, at: u32) -> bool {
    let expression = match token_at(code, at) {
        Some(Token::Switch { expression }) => (**expression).clone(),
        _ => return false,
    };
    let opens_with_case = next_key(code, at)
        .and_then(|k| token_at(code, k))
        .is_some_and(|token| matches!(token, Token::Case { .. }));
    if !opens_with_case {
        return false;
    }

    let mut cases: Vec<SwitchCase> = Vec::new();
    let mut last_case = false;
    while let Some(offset) = next_key(code, at) {
        let Some(entry) = code.remove(&offset) else {
            break;
        };
        match entry {
            BytecodeEntry::Token(token @ Token::Case { .. }) => {
                last_case = token.is_default_case();
                let label = match token {
                    Token::Case {
                        value: Some(value), ..
                    } if !last_case => CaseLabel::Value(*value),
                    _ => CaseLabel::Default,
                };
                cases.push(SwitchCase {
                    offset,
                    label,
                    body: Code::new(),
                });
            }
            BytecodeEntry::Token(Token::Jump { .. }) => {
                if let Some(case) = cases.last_mut() {
                    case.body.insert(offset, BytecodeEntry::Break);
                }
                if last_case {
                    break;
                }
            }
            other => {
                if let Some(case) = cases.last_mut() {
                    case.body.insert(offset, other);
                }
            }
        }
    }

    for case in &mut cases {
        case.body = structure(std::mem::take(&mut case.body));
    }
    code.insert(at, BytecodeEntry::Switch(Switch { expression, cases }));
    true
}
