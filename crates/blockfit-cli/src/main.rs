mod command;
mod progress;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
