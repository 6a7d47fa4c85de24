use actix_web::{middleware::Logger, web, App, HttpServer};

use todos_backend::auth::{AuthMiddleware, TokenService};
use todos_backend::config::Config;
use todos_backend::db::connect_pool;
use todos_backend::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = connect_pool(&config)
        .await
        .expect("Failed to connect to database");
    let token_service = web::Data::new(TokenService::new(
        &config.auth_secret_key,
        config.access_token_expire_minutes,
    ));

    let bind_addr = (config.server_host.clone(), config.server_port);
    log::info!(
        "Starting {} v{} at {}",
        config.project_name,
        config.app_version,
        config.server_url()
    );

    let app_config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(token_service.clone())
            .app_data(app_config.clone())
            .wrap(Logger::default())
            .service(routes::health::healthcheck)
            .service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
