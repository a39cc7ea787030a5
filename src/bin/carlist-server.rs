/// carlist listing server
///
/// Serves the vehicle listing page and JSON API over the bundled datasets.

use carlist::config::Config;
use carlist::server::run_server;
use clap::Parser;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();

    run_server(config).await
}
