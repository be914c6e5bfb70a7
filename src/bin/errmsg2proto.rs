use clap::Parser;
use errmsg_proto::cli::{run, Args, Config};

fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let argv: Vec<String> = std::env::args().collect();
    let config = Config::from_args(Args::parse(), &argv);
    run(&config)?;
    Ok(())
}
