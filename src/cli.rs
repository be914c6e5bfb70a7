use crate::{catalog, check, emitter, Error};
use log::info;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[clap(about = "Generate a protobuf ErrorCode enum from MySQL's errmsg-utf8.txt")]
pub struct Args {
    /// The path to the error message file, usually
    /// <mysql_src_root>/sql/share/errmsg-utf8.txt
    #[clap(
        long = "mysql-errmsg-utf8-file",
        visible_alias = "mysql_errmsg_utf8_file",
        value_name = "PATH",
        value_parser
    )]
    errmsg_file: PathBuf,
    /// Where to write the generated proto file.
    #[clap(
        long = "output-proto-file",
        visible_alias = "output_proto_file",
        value_name = "PATH",
        value_parser
    )]
    output: PathBuf,
    /// The output proto package name.
    #[clap(
        long = "proto-package-name",
        visible_alias = "proto_package_name",
        value_name = "NAME",
        default_value = "mysql"
    )]
    package: String,
    /// Compile the generated file with protox before writing it.
    #[clap(long)]
    check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub package: String,
    /// Recorded in the generated header.
    pub command_line: String,
    pub check: bool,
}

fn expand(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&text).into_owned())
}

impl Config {
    pub fn from_args(args: Args, argv: &[String]) -> Self {
        Self {
            input: expand(args.errmsg_file),
            output: expand(args.output),
            package: args.package,
            command_line: argv.join(" "),
            check: args.check,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub symbols: usize,
    pub output: PathBuf,
}

/// Parses the catalog and writes the rendered enum. Nothing is written unless
/// every earlier step succeeded.
pub fn run(config: &Config) -> Result<RunSummary, Error> {
    let catalog = catalog::parse_catalog_file(&config.input)?;
    info!(
        "{}: {} symbols, declared start {:?}",
        config.input.display(),
        catalog.symbols.len(),
        catalog.declared_start
    );
    let text = emitter::render(&catalog.symbols, &config.package, &config.command_line);
    if config.check {
        check::check_rendered(&config.package, &text, &catalog.symbols)?;
    }
    emitter::write_output(&config.output, &text)?;
    info!("wrote {}", config.output.display());
    Ok(RunSummary {
        symbols: catalog.symbols.len(),
        output: config.output.clone(),
    })
}
