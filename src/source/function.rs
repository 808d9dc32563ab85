//! Function declarations and bodies

use super::types::type_name;
use super::SourceEmitter;
use crate::bytecode::decompile_bytecode;
use crate::model::{FunctionDef, FunctionFlags, PropertyFlags};
use crate::DecompilerResult;

/// Specifier keywords written after `native`, in order
const SPECIFIERS: &[(&str, FunctionFlags)] = &[
    ("simulated", FunctionFlags::SIMULATED),
    ("static", FunctionFlags::STATIC),
    ("final", FunctionFlags::FINAL),
    ("iterator", FunctionFlags::ITERATOR),
    ("latent", FunctionFlags::LATENT),
    ("exec", FunctionFlags::EXEC),
];

impl SourceEmitter<'_> {
    /// Declaration line followed by `;` or a body block
    pub fn function(&self, function: &FunctionDef, indent: usize) -> DecompilerResult<String> {
        log::debug!("Emitting function {}", function.name);
        let mut out = self.signature(function);

        if function.flags.contains(FunctionFlags::NATIVE) || function.has_empty_body() {
            out.push(';');
            return Ok(out);
        }

        out.push_str(&self.ctx.new_line(indent));
        out.push('{');

        let mut groups: Vec<(String, Vec<&str>)> = Vec::new();
        for local in function.locals() {
            let ty = type_name(local);
            match groups.iter_mut().find(|(group, _)| *group == ty) {
                Some((_, names)) => names.push(local.name.as_str()),
                None => groups.push((ty, vec![local.name.as_str()])),
            }
        }
        if !groups.is_empty() {
            for (ty, names) in &groups {
                out.push_str(&self.ctx.new_line(indent + 1));
                out.push_str(&format!("local {} {};", ty, names.join(", ")));
            }
            out.push_str(&self.ctx.new_line(0));
        }

        out.push_str(&decompile_bytecode(&function.bytecode, self.ctx, indent + 1)?);
        out.push_str(&self.ctx.new_line(indent));
        out.push('}');
        Ok(out)
    }

    /// `native(130) static final function int Name(optional out int A)`
    pub fn signature(&self, function: &FunctionDef) -> String {
        let flags = function.flags;
        let mut out = String::new();

        if flags.contains(FunctionFlags::NATIVE) {
            out.push_str("native");
            if function.native_index != 0 {
                out.push_str(&format!("({})", function.native_index));
            }
            out.push(' ');
        }
        for (word, flag) in SPECIFIERS {
            if flags.contains(*flag) {
                out.push_str(word);
                out.push(' ');
            }
        }
        if flags.contains(FunctionFlags::EVENT) {
            out.push_str("event ");
        } else if flags.contains(FunctionFlags::OPERATOR) {
            out.push_str(&format!("operator({}) ", function.operator_precedence));
        } else {
            out.push_str("function ");
        }

        if let Some(returns) = function.return_property() {
            out.push_str(&type_name(returns));
            out.push(' ');
        }

        let parameters: Vec<String> = function
            .parameters()
            .map(|parameter| {
                let mut text = String::new();
                if parameter.flags.contains(PropertyFlags::OPTIONAL_PARM) {
                    text.push_str("optional ");
                }
                if parameter.flags.contains(PropertyFlags::OUT_PARM) {
                    text.push_str("out ");
                }
                text.push_str(&type_name(parameter));
                text.push(' ');
                text.push_str(&parameter.name);
                text
            })
            .collect();
        out.push_str(&format!("{}({})", function.name, parameters.join(", ")));
        out
    }
}
