use server::Server;

pub mod config;
pub mod controller;
pub mod endpoint;
pub mod entity;
pub mod macro_tool;
pub mod server;
#[cfg(test)]
pub mod test;
pub mod util;

#[tokio::main]
async fn main() {
    let config = config::init().await;
    server::logger::init(&config);

    match Server::new(config).await {
        Ok(server) => server.start().await,
        Err(err) => tracing::error!(%err, "server_construct"),
    }
}
