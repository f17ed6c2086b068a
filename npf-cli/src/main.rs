// Command-line interface for npf
//
// This binary converts Tumblr NPF posts into WordPress block markup, and helps inspect how a
// post goes through the conversion. The conversion itself lives in the npf-babel crate; this
// crate only reads files, loads configuration, logs and reports errors.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. The to defaults to convert.format from
// the configuration.
// Usage:
//  npf <input> [--to <format>] [--from <format>] [--output <file>]          - Convert (default)
//  npf convert <input> [--to <format>] [--from <format>] [--output <file>]  - Same as above
//  npf inspect <path> [<transform>]      - Execute a transform (defaults to "tree-treeviz")
//  npf import <response.json> [--pages] [--output <file>]  - Posts (or pages) response to records
//  npf --list-transforms                 - List available transforms
//
// Logging goes to stderr and is filtered through NPF_LOG (e.g. NPF_LOG=debug), warn by default.

use npf_cli::transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use npf_babel::post::{import_pages, import_posts};
use npf_babel::{ConvertError, FormatRegistry, FormatTags, PostDefaults};
use serde::Serialize;
use npf_config::{Loader, NpfConfig};
use std::fs;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "import", "help"];

fn build_cli() -> Command {
    Command::new("npf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting NPF posts to block markup")
        .long_about(
            "npf converts posts in Tumblr's Neue Post Format into WordPress block markup.\n\n\
            Commands:\n  \
            - convert: Convert a post between formats (default)\n  \
            - inspect: View a post at one stage of the conversion\n  \
            - import:  Turn a posts API response into content records\n\n\
            Examples:\n  \
            npf post.json                           # Block markup to stdout\n  \
            npf post.json --to html -o post.html    # Rendered HTML fragment\n  \
            npf inspect post.json                   # Tree visualization\n  \
            npf import posts.json -o records.json   # One record per post",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .long_about(
                    "View a post at different processing stages.\n\n\
                    Transforms (stage-format):\n  \
                    - source-json:   Decoded content blocks\n  \
                    - spans-json:    Resolved formatting spans per text block\n  \
                    - tree-json:     Block tree as JSON\n  \
                    - tree-treeviz:  Block tree visualization (default)\n\n\
                    Examples:\n  \
                    npf inspect post.json                # Tree visualization (default)\n  \
                    npf inspect post.json spans-json     # Where formatting ranges split",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the post JSON")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'tree-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert a post between formats.\n\n\
                    Supported formats:\n  \
                    - npf:      NPF post JSON (.npf, .json), input only\n  \
                    - blocks:   Block markup (.blocks)\n  \
                    - json:     Block tree as JSON\n  \
                    - html:     Rendered HTML fragment (.html), output only\n  \
                    - treeviz:  Tree visualization (.tree), output only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to convert.format from the configuration)")
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Convert a posts API response into content records")
                .long_about(
                    "Reads a posts API response ({\"response\": {\"posts\": [...]}}) and writes a\n\
                    JSON array with one record per post: title, content, date, status, author\n\
                    and sticky. Posts that fail to convert are skipped with a warning.\n\n\
                    With --pages, reads a pages response ({\"pages\": [...]}) instead. Page\n\
                    records add menu_order, modified and slug, and are published only when\n\
                    the page is linked (show_link).\n\n\
                    Post status and the author come from the [import] section of the configuration.",
                )
                .arg(
                    Arg::new("input")
                        .help("Posts or pages response file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pages")
                        .long("pages")
                        .help("Read a pages response and write page records")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("NPF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file argument means the default convert command
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str()) {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let tags = FormatTags::from(&config.formatting);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &tags);
        }
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let registry = FormatRegistry::with_tags(tags);

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or(config.convert.format.as_str());

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output);
        }
        Some(("import", sub_matches)) => {
            let input = required(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let pages = sub_matches.get_flag("pages");
            handle_import_command(input, output, pages, &PostDefaults::from(&config.import), &tags);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing argument '{name}'");
            std::process::exit(1);
        }
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            info!(path, "wrote output");
        }
        None => print!("{text}"),
    }
}

fn handle_inspect_command(path: &str, transform: &str, tags: &FormatTags) {
    let source = read_input(path);

    let output = transforms::execute_transform(&source, transform, tags).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    println!("{}", output.trim_end());
}

fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
) {
    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);
    debug!(input, from, to, "converting");

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let result = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    write_output(output, &result);
}

fn handle_import_command(
    input: &str,
    output: Option<&str>,
    pages: bool,
    defaults: &PostDefaults,
    tags: &FormatTags,
) {
    let source = read_input(input);

    let text = if pages {
        import_records("page", import_pages(&source, defaults, tags))
    } else {
        import_records("post", import_posts(&source, defaults, tags))
    };
    write_output(output, &format!("{text}\n"));
}

/// Keeps the records that converted, logging the others, and renders them as
/// a JSON array.
fn import_records<R: Serialize>(
    kind: &str,
    results: Result<Vec<Result<R, ConvertError>>, ConvertError>,
) -> String {
    let results = results.unwrap_or_else(|e| {
        eprintln!("Import error: {e}");
        std::process::exit(1);
    });

    let total = results.len();
    let records: Vec<R> = results
        .into_iter()
        .enumerate()
        .filter_map(|(index, result)| match result {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(index, error = %err, "skipping {kind}");
                None
            }
        })
        .collect();
    debug!(kind, imported = records.len(), skipped = total - records.len(), "import finished");

    serde_json::to_string_pretty(&records).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    })
}

fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  source      - Decoded content blocks");
    println!("  spans       - Formatting ranges resolved into flat spans");
    println!("  tree        - Block tree after conversion\n");

    println!("Formats:");
    println!("  json        - JSON output (all stages)");
    println!("  treeviz     - Tree visualization (tree only)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> NpfConfig {
    let loader = Loader::new().with_optional_file("npf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
