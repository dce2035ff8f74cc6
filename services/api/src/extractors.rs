use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use common::{Role, User};
use futures_util::future::LocalBoxFuture;

use crate::auth_guard::authenticate;
use crate::error::HttpApiError;

/// Authenticated admin, loaded from the `adminToken` cookie.
pub struct AdminSession(pub User);

/// Authenticated patient, loaded from the shared `patientToken` cookie.
pub struct PatientSession(pub User);

impl FromRequest for AdminSession {
    type Error = HttpApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authenticate(&req, Role::Admin).await.map(AdminSession) })
    }
}

impl FromRequest for PatientSession {
    type Error = HttpApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authenticate(&req, Role::Patient).await.map(PatientSession) })
    }
}
