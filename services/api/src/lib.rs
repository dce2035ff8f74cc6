pub mod auth_guard;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod state;

use actix_web::{App, HttpResponse, web};

/// Malformed or incomplete JSON bodies get the same envelope as every other
/// validation failure instead of the framework default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            actix_web::error::JsonPayloadError::Deserialize(_) => "Please Fill Full Form!",
            _ => "Bad Request - Invalid JSON",
        };
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "message": message,
        }));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

pub fn create_app(
    state: state::AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
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
}
