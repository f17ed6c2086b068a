use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["source-json", "spans-json", "tree-json", "tree-treeviz"];

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("npf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting NPF posts to block markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a npf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect a post at one stage of the conversion")
                .arg(input_arg("Path to the post JSON"))
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format, e.g., 'spans-json')")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .arg(input_arg("Input file path"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format")
                        .value_parser(["npf", "blocks", "json"]),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .value_parser(["blocks", "json", "html", "treeviz"]),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Convert a posts API response into content records")
                .arg(input_arg("Posts or pages response file"))
                .arg(
                    Arg::new("pages")
                        .long("pages")
                        .help("Read a pages response and write page records")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "npf", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "npf", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "npf", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
