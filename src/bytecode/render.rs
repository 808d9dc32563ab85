//! Statement tree to source text

use super::{BytecodeEntry, CaseLabel, Code, DoUntil, For, ForEach, If, Switch, While};
use crate::decompiler::DecompileContext;
use crate::model::{Instruction, Token};
use crate::DecompilerResult;

/// Append every entry of `code`, each on its own line at `indent`
pub fn write_code(
    out: &mut String,
    code: &Code,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    for (at, entry) in code {
        out.push_str(&ctx.new_line(indent));
        write_entry(out, *at, entry, ctx, indent)?;
    }
    Ok(())
}

fn write_entry(
    out: &mut String,
    at: u32,
    entry: &BytecodeEntry,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    match entry {
        BytecodeEntry::Token(token) => {
            if token.is_control() {
                log::warn!("Unstructured control token at 0x{:04X}", at);
            }
            out.push_str(&statement(token, ctx)?);
        }
        BytecodeEntry::Break => out.push_str("break;"),
        BytecodeEntry::If(node) => write_if(out, node, ctx, indent)?,
        BytecodeEntry::While(node) => write_while(out, node, ctx, indent)?,
        BytecodeEntry::DoUntil(node) => write_do_until(out, node, ctx, indent)?,
        BytecodeEntry::For(node) => write_for(out, node, ctx, indent)?,
        BytecodeEntry::ForEach(node) => write_for_each(out, node, ctx, indent)?,
        BytecodeEntry::Switch(node) => write_switch(out, node, ctx, indent)?,
    }
    Ok(())
}

fn statement(token: &Token, ctx: &DecompileContext<'_>) -> DecompilerResult<String> {
    let text = token.render(ctx)?;
    Ok(match token {
        Token::Case { .. } => text,
        _ => text + ";",
    })
}

/// `{`, the body one level deeper, `}`
fn write_block(
    out: &mut String,
    body: &Code,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    out.push_str(&ctx.new_line(indent));
    out.push('{');
    write_code(out, body, ctx, indent + 1)?;
    out.push_str(&ctx.new_line(indent));
    out.push('}');
    Ok(())
}

fn write_if(
    out: &mut String,
    node: &If,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    out.push_str(&format!("if ( {} )", node.condition.render(ctx)?));
    write_block(out, &node.body, ctx, indent)?;

    let Some(else_branch) = &node.else_branch else {
        return Ok(());
    };
    out.push_str(&ctx.new_line(indent));
    let mut entries = else_branch.body.values();
    match (entries.next(), entries.next()) {
        (Some(BytecodeEntry::If(chained)), None) => {
            out.push_str("else ");
            write_if(out, chained, ctx, indent)
        }
        _ => {
            out.push_str("else");
            write_block(out, &else_branch.body, ctx, indent)
        }
    }
}

fn write_while(
    out: &mut String,
    node: &While,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    out.push_str(&format!("while ( {} )", node.condition.render(ctx)?));
    write_block(out, &node.body, ctx, indent)
}

fn write_do_until(
    out: &mut String,
    node: &DoUntil,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    out.push_str("do");
    write_block(out, &node.body, ctx, indent)?;
    out.push_str(&ctx.new_line(indent));
    out.push_str(&format!("until ( {} );", node.condition.token.render(ctx)?));
    Ok(())
}

fn for_part(part: &Option<Instruction>, ctx: &DecompileContext<'_>) -> DecompilerResult<String> {
    match part {
        Some(instruction) => Ok(instruction.token.render(ctx)? + " "),
        None => Ok(String::new()),
    }
}

fn write_for(
    out: &mut String,
    node: &For,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    out.push_str(&format!(
        "for ( {}; {}; {})",
        for_part(&node.init, ctx)?,
        for_part(&node.condition, ctx)?,
        for_part(&node.post, ctx)?
    ));
    write_block(out, &node.body, ctx, indent)
}

fn write_for_each(
    out: &mut String,
    node: &ForEach,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    out.push_str(&format!("ForEach {}", node.iterator.render(ctx)?));
    write_block(out, &node.body, ctx, indent)
}

fn write_switch(
    out: &mut String,
    node: &Switch,
    ctx: &DecompileContext<'_>,
    indent: usize,
) -> DecompilerResult<()> {
    out.push_str(&format!("switch ( {} )", node.expression.render(ctx)?));
    out.push_str(&ctx.new_line(indent));
    out.push('{');
    for case in &node.cases {
        out.push_str(&ctx.new_line(indent + 1));
        match &case.label {
            CaseLabel::Value(value) => out.push_str(&format!("case {}:", value.render(ctx)?)),
            CaseLabel::Default => out.push_str("default:"),
        }
        write_code(out, &case.body, ctx, indent + 2)?;
    }
    out.push_str(&ctx.new_line(indent));
    out.push('}');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::decompile_code;
    use crate::decompiler::DecompileOptions;
    use crate::format::LineEnding;
    use crate::model::{Package, CASE_DEFAULT};

    fn render(instructions: Vec<(u32, Token)>) -> String {
        let package = Package::new("Test");
        let options = DecompileOptions {
            map_mode: false,
            line_ending: LineEnding::Lf,
        };
        let ctx = DecompileContext::new(&package, &options);
        let instructions: Vec<Instruction> = instructions
            .into_iter()
            .map(|(at, token)| Instruction::new(at, token))
            .collect();
        let mut out = String::new();
        write_code(&mut out, &decompile_code(&instructions), &ctx, 0).unwrap();
        out
    }

    fn call(name: &str) -> Token {
        Token::FunctionCall {
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    fn flag(name: &str) -> Box<Token> {
        Box::new(Token::InstanceVariable(name.to_string()))
    }

    #[test]
    fn test_else_if_chain() {
        let text = render(vec![
            (0, Token::JumpIfNot { target: 10, condition: flag("bA") }),
            (4, call("A")),
            (8, Token::Jump { target: 30 }),
            (10, Token::JumpIfNot { target: 30, condition: flag("bB") }),
            (14, call("B")),
            (30, Token::Return(Box::new(Token::Nothing))),
        ]);
        assert_eq!(
            text,
            "\nif ( bA )\n{\n\tA();\n}\nelse if ( bB )\n{\n\tB();\n}"
        );
    }

    #[test]
    fn test_do_until_and_raw_jump() {
        let text = render(vec![
            (0, call("Tick")),
            (4, Token::JumpIfNot { target: 0, condition: flag("bDone") }),
            (8, Token::Jump { target: 0x40 }),
        ]);
        assert_eq!(
            text,
            "\ndo\n{\n\tTick();\n}\nuntil ( bDone );\njump 0x0040;"
        );
    }

    #[test]
    fn test_switch_layout() {
        let text = render(vec![
            (0, Token::Switch { expression: flag("Mode") }),
            (
                2,
                Token::Case {
                    next_offset: 10,
                    value: Some(Box::new(Token::IntConst(1))),
                },
            ),
            (4, call("A")),
            (6, Token::Jump { target: 20 }),
            (
                10,
                Token::Case {
                    next_offset: CASE_DEFAULT,
                    value: None,
                },
            ),
            (12, call("B")),
            (14, Token::Jump { target: 20 }),
        ]);
        assert_eq!(
            text,
            "\nswitch ( Mode )\n{\n\tcase 1:\n\t\tA();\n\t\tbreak;\n\tdefault:\n\t\tB();\n\t\tbreak;\n}"
        );
    }
}
