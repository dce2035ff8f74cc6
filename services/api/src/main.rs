use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use tracing_subscriber::EnvFilter;

use api::routes;
use api::state::{AppState, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let s = Settings::from_env();
    let db = db::connect(&s.database_url, 10).await.expect("db");
    db::migrate(&db).await.expect("migrations");

    let media_root = s.media_root.clone().unwrap_or_else(|| "./media".into());
    let media_base_url = s
        .media_base_url
        .clone()
        .unwrap_or_else(|| "http://localhost:8080/media".into());

    let state = AppState {
        db,
        jwt: auth::JwtKeys::from_secret(&s.jwt_secret_key),
        token_ttl: s.jwt_expires_seconds.unwrap_or(60 * 60 * 24 * 7),
        cookie_expire_days: s.cookie_expire.unwrap_or(7),
        cookie_secure: s.production(),
        store: Arc::new(storage::FsStore::new(media_root, media_base_url)),
    };

    let port = s.port.unwrap_or(8080);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_header()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .supports_credentials();
        for origin in [&s.frontend_url, &s.dashboard_url].into_iter().flatten() {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .app_data(api::json_config())
            .service(routes::user::patient_register)
            .service(routes::user::login)
            .service(routes::user::add_new_admin)
            .service(routes::user::add_new_doctor)
            .service(routes::user::get_all_doctors)
            .service(routes::user::get_admin_details)
            .service(routes::user::get_patient_details)
            .service(routes::user::logout_admin)
            .service(routes::user::logout_patient)
            .service(routes::appointment::post_appointment)
            .service(routes::message::send_message)
            .service(routes::message::get_all_messages)
            .default_service(web::to(|| async { HttpResponse::NotFound().finish() }))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
