pub mod catalog;
pub mod check;
pub mod cli;
pub mod emitter;


use miette::Diagnostic;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] catalog::CatalogError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Check(#[from] check::CheckError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] emitter::EmitError),
}
