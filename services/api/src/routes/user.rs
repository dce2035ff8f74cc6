use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, get, post, web};
use common::{AppError, Role, validate};
use serde_json::json;
use validator::Validate;

use crate::error::HttpApiError;
use crate::extractors::{AdminSession, PatientSession};
use crate::schemas::{LoginInput, NewAdminInput, NewDoctorForm, RegisterInput};
use crate::session;
use crate::state::AppState;

const ALLOWED_AVATAR_FORMATS: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

fn is_allowed_avatar(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ALLOWED_AVATAR_FORMATS.contains(&ct))
}

#[post("/api/v1/user/patient/register")]
pub async fn patient_register(
    data: web::Data<AppState>,
    payload: web::Json<RegisterInput>,
) -> Result<HttpResponse, HttpApiError> {
    let payload = payload.into_inner();
    payload
        .validate()
        .map_err(|e| AppError::Validation(validate::error_message(&e)))?;

    if db::find_user_by_email(&data.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already registered!".to_string()).into());
    }

    let password_hash = auth::hash_password(&payload.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal
    })?;

    let user = db::insert_user(
        &data.db,
        db::NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            nic: payload.nic,
            dob: payload.dob,
            gender: payload.gender,
            password_hash,
            role: payload.role,
            doctor_department: None,
            doc_avatar: None,
        },
    )
    .await?;

    session::respond_with_token(&data, &user, "User Registered!")
}

#[post("/api/v1/user/login")]
pub async fn login(
    data: web::Data<AppState>,
    payload: web::Json<LoginInput>,
) -> Result<HttpResponse, HttpApiError> {
    let payload = payload.into_inner();

    if payload.password != payload.confirm_password {
        return Err(AppError::Validation(
            "Password & Confirm Password Do Not Match!".to_string(),
        )
        .into());
    }

    // One message for unknown email and bad password; never reveal which.
    let user = db::find_user_by_email(&data.db, &payload.email)
        .await?
        .ok_or_else(|| AppError::InvalidCredentials("Invalid Email Or Password!".to_string()))?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials("Invalid Email Or Password!".to_string()).into());
    }

    if user.role != payload.role {
        return Err(
            AppError::InvalidCredentials("User Not Found With This Role!".to_string()).into(),
        );
    }

    session::respond_with_token(&data, &user, "Login Successfully!")
}

#[post("/api/v1/user/admin/addnew")]
pub async fn add_new_admin(
    _session: AdminSession,
    data: web::Data<AppState>,
    payload: web::Json<NewAdminInput>,
) -> Result<HttpResponse, HttpApiError> {
    let payload = payload.into_inner();
    payload
        .validate()
        .map_err(|e| AppError::Validation(validate::error_message(&e)))?;

    if let Some(existing) = db::find_user_by_email(&data.db, &payload.email).await? {
        return Err(AppError::Conflict(format!(
            "{} With This Email Already Exists!",
            existing.role
        ))
        .into());
    }

    let password_hash = auth::hash_password(&payload.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal
    })?;

    db::insert_user(
        &data.db,
        db::NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            nic: payload.nic,
            dob: payload.dob,
            gender: payload.gender,
            password_hash,
            role: Role::Admin,
            doctor_department: None,
            doc_avatar: None,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "New Admin Registered",
    })))
}

#[post("/api/v1/user/doctor/addnew")]
pub async fn add_new_doctor(
    _session: AdminSession,
    data: web::Data<AppState>,
    MultipartForm(mut form): MultipartForm<NewDoctorForm>,
) -> Result<HttpResponse, HttpApiError> {
    let avatar = form
        .doc_avatar
        .take()
        .ok_or_else(|| AppError::Validation("Doctor Avatar Required!".to_string()))?;

    let content_type = avatar.content_type.as_ref().map(|m| m.essence_str());
    if !is_allowed_avatar(content_type) {
        return Err(AppError::Validation("File Format Not Supported!".to_string()).into());
    }

    let input = form.into_input()?;
    input
        .validate()
        .map_err(|e| AppError::Validation(validate::error_message(&e)))?;

    if let Some(existing) = db::find_user_by_email(&data.db, &input.email).await? {
        return Err(AppError::Conflict(format!(
            "{} With This Email Already Exists!",
            existing.role
        ))
        .into());
    }

    let stored = data
        .store
        .upload(avatar.file.path())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "avatar upload failed");
            AppError::Upstream("Failed To Upload Doctor Avatar!".to_string())
        })?;

    let password_hash = auth::hash_password(&input.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal
    })?;

    let doctor = db::insert_user(
        &data.db,
        db::NewUser {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            nic: input.nic,
            dob: input.dob,
            gender: input.gender,
            password_hash,
            role: Role::Doctor,
            doctor_department: Some(input.doctor_department),
            doc_avatar: Some(common::Avatar {
                public_id: stored.public_id,
                url: stored.secure_url,
            }),
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "New Doctor Registered!",
        "doctor": doctor,
    })))
}

#[get("/api/v1/user/doctors")]
pub async fn get_all_doctors(data: web::Data<AppState>) -> Result<HttpResponse, HttpApiError> {
    let doctors = db::list_doctors(&data.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "doctors": doctors,
    })))
}

#[get("/api/v1/user/admin/me")]
pub async fn get_admin_details(
    AdminSession(user): AdminSession,
) -> Result<HttpResponse, HttpApiError> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": user,
    })))
}

#[get("/api/v1/user/patient/me")]
pub async fn get_patient_details(
    PatientSession(user): PatientSession,
) -> Result<HttpResponse, HttpApiError> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": user,
    })))
}

#[get("/api/v1/user/admin/logout")]
pub async fn logout_admin(
    _session: AdminSession,
    data: web::Data<AppState>,
) -> Result<HttpResponse, HttpApiError> {
    Ok(HttpResponse::Ok()
        .cookie(session::expired_cookie(
            session::ADMIN_COOKIE,
            data.cookie_secure,
        ))
        .json(json!({
            "success": true,
            "message": "Admin Logged Out Successfully!",
        })))
}

#[get("/api/v1/user/patient/logout")]
pub async fn logout_patient(
    _session: PatientSession,
    data: web::Data<AppState>,
) -> Result<HttpResponse, HttpApiError> {
    Ok(HttpResponse::Ok()
        .cookie(session::expired_cookie(
            session::PATIENT_COOKIE,
            data.cookie_secure,
        ))
        .json(json!({
            "success": true,
            "message": "Patient Logged Out Successfully!",
        })))
}
