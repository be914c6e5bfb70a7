use crate::catalog::BASE_OFFSET;
use miette::Diagnostic;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

const ENTRY_INDENT: &str = "        ";
const DOC_URL: &str = "https://dev.mysql.com/doc/refman/5.6/en/error-messages-server.html";

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum EmitError {
    #[error("failed to write {path}")]
    #[diagnostic(code(errmsg_proto::emit::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pairs every symbol with `BASE_OFFSET + index`.
pub fn assign_codes(symbols: &[String]) -> impl Iterator<Item = (&str, u32)> + '_ {
    (BASE_OFFSET..).zip(symbols).map(|(code, symbol)| (symbol.as_str(), code))
}

fn render_entries(symbols: &[String]) -> String {
    assign_codes(symbols)
        .map(|(symbol, code)| format!("{}{} = {};", ENTRY_INDENT, symbol, code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the `ErrorCode` proto file. `command_line` ends up in the header
/// so a regenerated file records how it was produced.
pub fn render(symbols: &[String], package: &str, command_line: &str) -> String {
    format!(
        "package {package};
// AUTO-GENERATED.  DO NOT MODIFY!
//
// original command: {command_line}
//
// For additional information on error codes, see
// {DOC_URL}

message ErrorCode {{
    enum Type {{
        OK = 0;
{entries}
    }}
}}",
        entries = render_entries(symbols),
    )
}

pub fn write_output(path: &Path, text: &str) -> Result<(), EmitError> {
    let err = |source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut out = std::fs::File::create(path).map_err(err)?;
    out.write_all(text.as_bytes()).map_err(err)?;
    Ok(())
}
