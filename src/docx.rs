//! Word document assembly.
//!
//! Every block becomes one or more paragraphs (or a table) in a `docx_rs`
//! document. All styling values come from [`Config`].

use std::path::Path;

use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelOverride, LevelText,
    LineSpacing, NumberFormat, Numbering, NumberingId, Paragraph, ParagraphBorder,
    ParagraphBorderPosition, ParagraphBorders, Run, RunFonts, SpecialIndentType, Start, Style,
    StyleType, Table, TableCell, TableRow,
};
use tempfile::NamedTempFile;

use crate::block::{Block, List, Span};
use crate::config::Config;
use crate::error::ConvertError;
use crate::inline;

const BULLET_ABSTRACT: usize = 1;
const DECIMAL_ABSTRACT: usize = 2;
const BULLET_NUMBERING: usize = 1;
// Each ordered list gets its own numbering instance so it restarts at 1
const FIRST_ORDERED_NUMBERING: usize = 2;

// Measurements in twentieths of a point
const LIST_INDENT: i32 = 420;
const LIST_HANGING: i32 = 420;
const QUOTE_INDENT: i32 = 720;
const QUOTE_SPACING: u32 = 120;
const RULE_SPACING_AFTER: u32 = 240;
const TABLE_WIDTH: usize = 9000;

const HEADING_LEVELS: u8 = 6;

/// Create an empty document with the body style and the list and heading
/// definitions registered.
pub fn new_document(config: &Config) -> Docx {
    let bullet = AbstractNumbering::new(BULLET_ABSTRACT).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )
        .indent(
            Some(LIST_INDENT),
            Some(SpecialIndentType::Hanging(LIST_HANGING)),
            None,
            None,
        ),
    );
    let decimal = AbstractNumbering::new(DECIMAL_ABSTRACT).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("decimal"),
            LevelText::new("%1."),
            LevelJc::new("left"),
        )
        .indent(
            Some(LIST_INDENT),
            Some(SpecialIndentType::Hanging(LIST_HANGING)),
            None,
            None,
        ),
    );

    let mut docx = Docx::new()
        .default_fonts(fonts(&config.body.font))
        .default_size(config.body_half_points())
        .add_abstract_numbering(bullet)
        .add_abstract_numbering(decimal)
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_ABSTRACT));

    for level in 1..=HEADING_LEVELS {
        docx = docx.add_style(
            Style::new(&heading_style(level), StyleType::Paragraph)
                .name(&format!("Heading {}", level))
                .based_on("Normal")
                .outline_lvl(usize::from(level - 1)),
        );
    }

    docx
}

/// Convert blocks to a Word document
pub fn blocks_to_docx(blocks: &[Block], config: &Config) -> Docx {
    let mut docx = new_document(config);
    let mut next_numbering = FIRST_ORDERED_NUMBERING;

    for block in blocks {
        docx = match block {
            Block::Heading { level, text } => docx.add_paragraph(heading(*level, text, config)),
            Block::Rule => docx.add_paragraph(rule()),
            Block::Table { columns, rows } => {
                if *columns == 0 {
                    log::warn!("skipping table with {} row(s) and no cells", rows.len());
                    docx
                } else {
                    docx.add_table(table(*columns, rows, config))
                }
            }
            Block::List(list) => {
                let (docx, numbering) = if list.ordered {
                    let id = next_numbering;
                    next_numbering += 1;
                    let docx = docx.add_numbering(
                        Numbering::new(id, DECIMAL_ABSTRACT)
                            .add_override(LevelOverride::new(0).start(1)),
                    );
                    (docx, id)
                } else {
                    (docx, BULLET_NUMBERING)
                };
                emit_list(docx, list, numbering, config)
            }
            Block::CodeBlock { content } => docx.add_paragraph(code_block(content, config)),
            Block::Quote { text } => docx.add_paragraph(
                text_paragraph(text, config)
                    .indent(Some(QUOTE_INDENT), None, Some(QUOTE_INDENT), None)
                    .line_spacing(LineSpacing::new().before(QUOTE_SPACING).after(QUOTE_SPACING)),
            ),
            Block::Paragraph { text } => docx.add_paragraph(text_paragraph(text, config)),
            Block::Blank => docx.add_paragraph(Paragraph::new()),
        };
    }

    docx
}

/// Write the document to `path`.
///
/// The package is written to a temporary file next to `path` and renamed
/// into place only once it is complete, so a failed save leaves no file.
pub fn save(docx: Docx, path: &Path) -> Result<(), ConvertError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_error = |source: std::io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    docx.build()
        .pack(file.as_file_mut())
        .map_err(|e| ConvertError::Package(e.to_string()))?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}

fn heading_style(level: u8) -> String {
    format!("Heading{}", level)
}

fn fonts(name: &str) -> RunFonts {
    RunFonts::new()
        .ascii(name)
        .hi_ansi(name)
        .east_asia(name)
        .cs(name)
}

/// Headings ignore inline styling; the text is written as one run.
fn heading(level: u8, text: &str, config: &Config) -> Paragraph {
    Paragraph::new()
        .style(&heading_style(level))
        .outline_lvl(usize::from(level - 1))
        .add_run(
            Run::new()
                .add_text(text)
                .fonts(fonts(&config.heading.font))
                .bold()
                .size(config.heading_half_points())
                .color(&config.heading.color),
        )
}

fn rule() -> Paragraph {
    Paragraph::new()
        .set_borders(
            ParagraphBorders::with_empty()
                .set(ParagraphBorder::new(ParagraphBorderPosition::Bottom)),
        )
        .line_spacing(LineSpacing::new().after(RULE_SPACING_AFTER))
}

fn table(columns: usize, rows: &[Vec<String>], config: &Config) -> Table {
    let rows = rows
        .iter()
        .map(|row| {
            let cells = (0..columns)
                .map(|j| {
                    let text = row.get(j).map(String::as_str).unwrap_or("");
                    TableCell::new().add_paragraph(text_paragraph(text, config))
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Table::new(rows).set_grid(vec![TABLE_WIDTH / columns; columns])
}

fn emit_list(docx: Docx, list: &List, numbering: usize, config: &Config) -> Docx {
    list.items.iter().fold(docx, |docx, item| {
        docx.add_paragraph(
            text_paragraph(&item.text, config)
                .numbering(NumberingId::new(numbering), IndentLevel::new(0)),
        )
    })
}

fn code_block(content: &str, config: &Config) -> Paragraph {
    let mut run = Run::new()
        .fonts(fonts(&config.body.font))
        .size(config.body_half_points())
        .color(&config.body.color);

    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }

    Paragraph::new().add_run(run).keep_lines(true)
}

fn text_paragraph(text: &str, config: &Config) -> Paragraph {
    inline::spans(text)
        .iter()
        .fold(Paragraph::new(), |p, span| p.add_run(span_run(span, config)))
}

fn span_run(span: &Span, config: &Config) -> Run {
    let run = Run::new()
        .add_text(span.text())
        .fonts(fonts(&config.body.font))
        .color(&config.body.color);

    match span {
        Span::Text(_) => run,
        Span::Bold(_) => run.bold(),
        Span::Code(_) => run.fonts(fonts(&config.code.font)),
        Span::Link { .. } if config.links.underline => run.underline("single"),
        Span::Link { .. } => run,
    }
}
