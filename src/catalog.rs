use log::{debug, warn};
use miette::Diagnostic;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

pub const ERROR_PREFIX: &str = "ER_";
pub const WARNING_PREFIX: &str = "WARN_";
pub const START_NUMBER_MARKER: &str = "start-error-number";
/// First code handed out to catalog symbols.
pub const BASE_OFFSET: u32 = 1000;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum CatalogError {
    #[error("failed to open catalog {path}")]
    #[diagnostic(code(errmsg_proto::catalog::open))]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read catalog")]
    #[diagnostic(code(errmsg_proto::catalog::io))]
    Io(#[from] std::io::Error),
    #[error("line {line}: cannot read a start number from `{text}`")]
    #[diagnostic(
        code(errmsg_proto::catalog::malformed_start_number),
        help("the catalog format has changed; refusing to generate codes from it")
    )]
    MalformedStartNumber { line: usize, text: String },
    #[error("catalog starts error numbers at {found}, expected {expected}")]
    #[diagnostic(
        code(errmsg_proto::catalog::start_number_mismatch),
        help("the catalog format has changed; refusing to generate codes from it")
    )]
    StartNumberMismatch { expected: u32, found: i64 },
}

/// Symbols extracted from an errmsg catalog, in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub symbols: Vec<String>,
    pub declared_start: Option<u32>,
}

enum Line<'a> {
    StartNumber(&'a str),
    Symbol(&'a str),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with(START_NUMBER_MARKER) {
        Line::StartNumber(line)
    } else if line.starts_with(ERROR_PREFIX) || line.starts_with(WARNING_PREFIX) {
        // starts with a prefix, so there is at least one token
        Line::Symbol(line.split_whitespace().next().unwrap_or(line))
    } else {
        Line::Other
    }
}

fn parse_start_number(line_no: usize, text: &str) -> Result<u32, CatalogError> {
    let found: i64 = text
        .split_whitespace()
        .nth(1)
        .and_then(|tok| tok.parse().ok())
        .ok_or_else(|| CatalogError::MalformedStartNumber {
            line: line_no,
            text: text.to_string(),
        })?;
    if found != i64::from(BASE_OFFSET) {
        return Err(CatalogError::StartNumberMismatch {
            expected: BASE_OFFSET,
            found,
        });
    }
    Ok(BASE_OFFSET)
}

pub fn parse_catalog(reader: impl BufRead) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match classify(line.trim()) {
            Line::StartNumber(text) => {
                catalog.declared_start = Some(parse_start_number(idx + 1, text)?);
            }
            Line::Symbol(symbol) => {
                debug!("symbol {} at line {}", symbol, idx + 1);
                catalog.symbols.push(symbol.to_string());
            }
            Line::Other => {}
        }
    }
    if catalog.declared_start.is_none() {
        warn!("catalog has no `{}` line", START_NUMBER_MARKER);
    }
    Ok(catalog)
}

pub fn parse_catalog_file(path: &Path) -> Result<Catalog, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(BufReader::new(file))
}
