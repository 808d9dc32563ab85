use super::utils::{read_model, write_output};
use crate::decompiler::{DecompileOptions, Decompiler};
use crate::DecompilerResult;
use std::path::PathBuf;

/// Arguments for the decompile command
#[derive(Debug, Clone)]
pub struct DecompileArgs {
    pub input_path: PathBuf,
    pub class: Option<String>,
    pub output_path: Option<PathBuf>,
    pub map: bool,
    pub lf: bool,
}

impl DecompileArgs {
    /// Convert to DecompileOptions
    pub fn to_options(&self) -> DecompileOptions {
        DecompileOptions::from_cli(self.map, self.lf)
    }
}

/// Run the decompile subcommand
pub fn decompile(args: &DecompileArgs) -> DecompilerResult<()> {
    let package = read_model(&args.input_path)?;
    let options = args.to_options();
    let separator = options.line_ending.as_str().repeat(2);
    let decompiler = Decompiler::with_options(options);

    let output = match &args.class {
        Some(name) => decompiler.decompile_class_named(&package, name)?,
        None => {
            let classes = decompiler.decompile_package(&package)?;
            if classes.is_empty() {
                log::warn!("Package {} exports no classes", package.name);
            }
            classes
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
                .join(&separator)
        }
    };

    write_output(&output, args.output_path.as_ref())
}
