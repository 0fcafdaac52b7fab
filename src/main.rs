use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use persona_learn::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if !config.has_api_key() {
        log::warn!("No model API key configured; sessions must enter one before asking for explanations");
    }
    log::info!(
        "Using {:?} provider at {} (preferred model {}, fallback {}, timeout {:?})",
        config.llm_provider,
        config.llm_api_base,
        config.preferred_model,
        config.fallback_model,
        config.request_timeout
    );

    let bind = (config.web_server_host.clone(), config.web_server_port);
    let allowed_origin = config.cors_allowed_origin.clone();
    let state = AppState::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
