use sdns::client::Client;
use sdns::config::{self, Config};
use sdns::{server, Result};
use simple_logger::SimpleLogger;
use std::sync::Arc;
use std::time::Duration;

const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

// sdns [config.toml]                 serve the records in config.toml
// sdns query <host:port> <name>      ask a running server once
#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [command, address, name] if command == "query" => query(address.clone(), name.clone()).await,
        [path] => serve(config::init_from_toml(path).await?).await,
        [] => serve(Config::default()).await,
        _ => {
            eprintln!("usage: sdns [config.toml] | sdns query <host:port> <name>");
            std::process::exit(2);
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    init_logger(&config)?;
    let master = config.master_file()?;
    log::info!("loaded {} owner name(s)", master.len());
    server::run(&config, Arc::new(master)).await
}

async fn query(address: String, name: String) -> Result<()> {
    init_logger(&Config::default())?;
    let response = tokio::task::spawn_blocking(move || {
        Client::connect(address.as_str(), QUERY_TIMEOUT)?.query(&name)
    })
    .await
    .map_err(|e| sdns::DnsError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;
    println!("{} ({})", response.rcode(), response.rcode().message());
    let sections = [
        response.answers(),
        response.name_servers(),
        response.additionals(),
    ];
    for record in sections.iter().flat_map(|section| section.iter()) {
        println!("{}", record);
    }
    Ok(())
}

fn init_logger(config: &Config) -> Result<()> {
    SimpleLogger::new()
        .with_level(config.level_filter()?)
        .init()
        .map_err(|e| sdns::DnsError::Config(e.to_string()))
}
