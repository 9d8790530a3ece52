mod booking;
mod cache;
mod client;
mod config;
mod handlers;
mod models;
mod routes;

use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    if dotenv().is_err() {
        warn!("no .env file found, reading configuration from the environment");
    }

    let config = Config::from_env()?;
    let api = web::Data::new(ApiClient::new(
        config.api_base_url.as_str(),
        config.api_timeout,
    )?);

    info!(
        "booking widget backend on {}:{} using {}",
        config.bind_addr, config.port, config.api_base_url
    );

    HttpServer::new(move || App::new().app_data(api.clone()).configure(routes::init))
        .bind((config.bind_addr.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
