mod routes;
mod store;

use actix_web::{middleware, web, App, HttpServer};
use log::info;

use crate::store::TodoStore;

const ADDR_ENV_VAR: &str = "TODO_SERVER_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:5000";

fn bind_address(raw: Option<String>) -> String {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = bind_address(std::env::var(ADDR_ENV_VAR).ok());
    let store = web::Data::new(TodoStore::default());

    info!("serving todos on http://{addr}/api");
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::bind_address;

    #[test]
    fn bind_address_falls_back_to_default() {
        assert_eq!(bind_address(None), "127.0.0.1:5000");
        assert_eq!(bind_address(Some("  ".into())), "127.0.0.1:5000");
        assert_eq!(bind_address(Some("0.0.0.0:8080".into())), "0.0.0.0:8080");
    }
}
