mod command;
mod config;
mod delimited;
mod logging;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
