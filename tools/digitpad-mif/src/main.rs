#[macro_use]
extern crate tracing;

use std::{io::Write, path::PathBuf};

#[derive(argh::FromArgs)]
/// convert hex dumps of trained weights into memory initialization files
struct Args {
    #[argh(positional)]
    /// hex dump to convert (single-file mode)
    input: Option<PathBuf>,

    #[argh(option, short = 'o')]
    /// where to write the converted file; stdout if omitted
    output: Option<PathBuf>,

    #[argh(option)]
    /// convert every *.mif file in this directory
    input_dir: Option<PathBuf>,

    #[argh(option)]
    /// directory receiving the *v2.mif files (directory mode)
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args: Args = argh::from_env();

    match (args.input, args.input_dir) {
        (Some(input), None) => match args.output {
            Some(output) => {
                digitpad_mif::convert_file(&input, &output)?;
                info!("wrote {}", output.display());
            }
            None => {
                let text = std::fs::read_to_string(&input)?;
                let mif = digitpad_mif::convert(&text)?;
                std::io::stdout().write_all(mif.as_bytes())?;
            }
        },
        (None, Some(input_dir)) => {
            let output_dir = args.output_dir.unwrap_or_else(|| input_dir.clone());
            let converted = digitpad_mif::convert_dir(&input_dir, &output_dir)?;
            info!(converted, output_dir = %output_dir.display(), "directory converted");
        }
        (Some(_), Some(_)) => anyhow::bail!("pass either an input file or --input-dir, not both"),
        (None, None) => anyhow::bail!("nothing to convert; pass an input file or --input-dir"),
    }

    Ok(())
}
