//! Compiles a rendered `ErrorCode` file with protox before it is written, so a
//! rendering that a protobuf compiler would reject never reaches disk.
use crate::emitter::assign_codes;
use miette::Diagnostic;
use prost_reflect::DescriptorPool;
use protox::{
    file::{File, FileResolver},
    Compiler,
};
use std::path::Path;

const FILE_NAME: &str = "error_code.proto";

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum CheckError {
    #[error("rendered proto does not compile")]
    #[diagnostic(
        code(errmsg_proto::check::compile),
        help("duplicate symbols in the catalog produce duplicate enum values")
    )]
    Compile(#[source] protox::Error),
    #[error("rendered proto has no enum `{0}`")]
    #[diagnostic(code(errmsg_proto::check::missing_enum))]
    MissingEnum(String),
    #[error("enum value #{index} is `{found}`, expected `{expected}`")]
    #[diagnostic(code(errmsg_proto::check::value_mismatch))]
    ValueMismatch {
        index: usize,
        expected: String,
        found: String,
    },
}

/// Serves a single in-memory file to the compiler.
struct RenderedFile {
    source: String,
}

impl FileResolver for RenderedFile {
    fn resolve_path(&self, path: &Path) -> Option<String> {
        (path == Path::new(FILE_NAME)).then(|| FILE_NAME.to_string())
    }
    fn open_file(&self, name: &str) -> Result<File, protox::Error> {
        if name == FILE_NAME {
            File::from_source(name, &self.source)
        } else {
            Err(protox::Error::file_not_found(name))
        }
    }
}

fn compile(text: &str) -> Result<DescriptorPool, protox::Error> {
    let mut compiler = Compiler::with_file_resolver(RenderedFile {
        source: text.to_string(),
    });
    compiler.include_imports(false);
    compiler.open_file(FILE_NAME)?;
    Ok(compiler.descriptor_pool())
}

pub fn check_rendered(package: &str, text: &str, symbols: &[String]) -> Result<(), CheckError> {
    let pool = compile(text).map_err(CheckError::Compile)?;
    let enum_name = format!("{}.ErrorCode.Type", package);
    let enum_ = pool
        .get_enum_by_name(&enum_name)
        .ok_or_else(|| CheckError::MissingEnum(enum_name.clone()))?;
    let expected = std::iter::once(("OK", 0)).chain(
        assign_codes(symbols).map(|(symbol, code)| (symbol, code as i32)),
    );
    let found: Vec<_> = enum_
        .values()
        .map(|v| format!("{} = {}", v.name(), v.number()))
        .collect();
    let expected: Vec<_> = expected
        .map(|(name, number)| format!("{} = {}", name, number))
        .collect();
    for index in 0..found.len().max(expected.len()) {
        let (e, f) = (expected.get(index), found.get(index));
        if e != f {
            return Err(CheckError::ValueMismatch {
                index,
                expected: e.cloned().unwrap_or_default(),
                found: f.cloned().unwrap_or_default(),
            });
        }
    }
    log::info!("{} compiles with {} values", enum_name, found.len());
    Ok(())
}
