//! Transform command implementation

use std::io::Read;
use std::path::Path;

use hardbreaks_ast::Node;
use hardbreaks_core::BreaksConfig;
use hardbreaks_parser::{MarkdownParser, Parser, parse_json_tree};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info, warn};

use crate::cli::Cli;

pub fn run_transform(cli: &Cli, file: Option<&Path>, json: bool, pretty: bool) -> Result<()> {
    let config = match &cli.config {
        Some(path) => BreaksConfig::from_file(path).into_diagnostic()?,
        None => find_config()?,
    };
    let transforms = config.build().into_diagnostic()?;
    debug!("Transforms: {:?}", transforms);

    let source = read_source(file)?;
    let mut tree = parse(&source, json || file.is_some_and(is_json_path))?;

    transforms.run(&mut tree).into_diagnostic()?;

    let output = if pretty {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    }
    .into_diagnostic()?;
    println!("{}", output);

    Ok(())
}

fn find_config() -> Result<BreaksConfig> {
    if let Some(path) = BreaksConfig::find_in(".") {
        info!("Using config: {}", path.display());
        return BreaksConfig::from_file(&path).into_diagnostic();
    }

    debug!("No config file found, using defaults");
    Ok(BreaksConfig::new())
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).into_diagnostic(),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()?;
            Ok(source)
        }
    }
}

fn parse(source: &str, json: bool) -> Result<Node> {
    if json {
        return parse_json_tree(source).into_diagnostic();
    }
    MarkdownParser::new().parse(source).into_diagnostic()
}

/// Decides the input format from the file extension.
///
/// `.json` is a serialized tree. Anything else is read as markdown, with a
/// warning when the markdown parser does not claim the extension.
fn is_json_path(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    if ext.eq_ignore_ascii_case("json") {
        return true;
    }

    let parser = MarkdownParser::new();
    if !parser.can_parse(ext) {
        warn!(
            "Unrecognized extension .{} (expected one of {}), parsing as markdown",
            ext,
            parser.extensions().join(", ")
        );
    }
    false
}
