use std::io::{self, BufRead, Write};

use ar_address_parser::{AddressParser, Cli};
use clap::Parser;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Ok(()) = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
    {};
    info!("Subscriber initialized.");

    if let Some(source) = cli.source {
        let Some(column) = cli.column else {
            error!("Batch mode requires --column naming the address-line column.");
            anyhow::bail!("missing --column");
        };
        info!(?source, %column, output = ?cli.output, "running batch parse");
        ar_address_parser::batch::parse_csv_column(&source, &column, &cli.output)?;
        info!("batch parse complete, wrote {:?}", cli.output);
        return Ok(());
    }

    let mut parser = AddressParser::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let result = parser.parse(&line);
        writeln!(out, "{}", serde_json::to_string(&result)?)?;
    }
    Ok(())
}
