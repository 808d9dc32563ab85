use super::utils::read_model;
use crate::decompiler::{DecompileContext, DecompileOptions};
use crate::model::{ClassDef, Field, FunctionDef};
use crate::DecompilerResult;
use std::path::Path;

/// Run the disasm subcommand: every function body as a flat token listing
pub fn disasm(input_path: &Path, class: Option<&str>) -> DecompilerResult<()> {
    let package = read_model(input_path)?;
    let classes: Vec<&ClassDef> = match class {
        Some(name) => vec![package.find_class(name)?],
        None => package.classes().collect(),
    };

    let options = DecompileOptions::default();
    let ctx = DecompileContext::new(&package, &options);
    let mut output = String::new();
    for class in classes {
        let mut functions = Vec::new();
        collect_functions(&class.name, &class.children, &mut functions);
        for (path, function) in functions {
            write_listing(&mut output, &path, function, &ctx)?;
        }
    }

    print!("{}", output);
    Ok(())
}

/// Functions of a container and of its states, with dotted paths
fn collect_functions<'c>(
    prefix: &str,
    children: &'c [Field],
    out: &mut Vec<(String, &'c FunctionDef)>,
) {
    for field in children {
        match field {
            Field::Function(function) => out.push((format!("{}.{}", prefix, function.name), function)),
            Field::State(state) => {
                collect_functions(&format!("{}.{}", prefix, state.name), &state.children, out)
            }
            _ => {}
        }
    }
}

fn write_listing(
    output: &mut String,
    path: &str,
    function: &FunctionDef,
    ctx: &DecompileContext<'_>,
) -> DecompilerResult<()> {
    output.push_str(&format!(
        "; {} ({} instructions)\n",
        path,
        function.bytecode.len()
    ));
    for instruction in &function.bytecode {
        output.push_str(&format!(
            "0x{:04X}: {}\n",
            instruction.offset,
            instruction.token.render(ctx)?
        ));
    }
    output.push('\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Instruction, Package, Token};

    #[test]
    fn test_listing_layout() {
        let package = Package::new("Game");
        let options = DecompileOptions::default();
        let ctx = DecompileContext::new(&package, &options);
        let function = FunctionDef {
            name: "Reset".into(),
            bytecode: vec![
                Instruction::new(
                    0,
                    Token::Let {
                        lhs: Box::new(Token::LocalVariable("i".into())),
                        rhs: Box::new(Token::IntConst(0)),
                    },
                ),
                Instruction::new(0x1A, Token::Return(Box::new(Token::Nothing))),
            ],
            ..Default::default()
        };

        let mut output = String::new();
        write_listing(&mut output, "Game.Reset", &function, &ctx).unwrap();
        assert_eq!(
            output,
            "; Game.Reset (2 instructions)\n0x0000: i = 0\n0x001A: return\n\n"
        );
    }
}
