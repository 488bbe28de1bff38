mod block;
mod config;
mod docx;
mod error;
mod inline;
mod parser;

pub use block::{Block, List, ListItem, Span};
pub use config::{BodyConfig, CodeConfig, Config, HeadingConfig, LinksConfig};
pub use docx::{blocks_to_docx, new_document, save};
pub use error::ConvertError;
pub use inline::spans;

use std::fs;
use std::path::{Path, PathBuf};

use docx_rs::Docx;

/// Extension given to derived output paths.
pub const OUTPUT_EXTENSION: &str = "docx";

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to a Word document using default config.
pub fn markdown_to_docx(markdown: &str) -> Docx {
    markdown_to_docx_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to a Word document with custom config.
pub fn markdown_to_docx_with_config(markdown: &str, config: &Config) -> Docx {
    let blocks = parse(markdown);
    docx::blocks_to_docx(&blocks, config)
}

/// The output path used when none is given: the input with its extension
/// replaced.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Convert the Markdown file at `input` and save it.
///
/// Returns the path the document was written to.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let output = output.map_or_else(|| output_path_for(input), Path::to_path_buf);
    log::info!("Converting {} -> {}", input.display(), output.display());

    let bytes = fs::read(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let markdown = String::from_utf8(bytes).map_err(|source| ConvertError::Encoding {
        path: input.to_path_buf(),
        source,
    })?;

    let blocks = parse(&markdown);
    log::info!("Parsed {} block(s)", blocks.len());

    docx::save(docx::blocks_to_docx(&blocks, config), &output)?;

    Ok(output)
}
