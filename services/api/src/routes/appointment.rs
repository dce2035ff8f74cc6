use actix_web::{HttpResponse, post, web};
use common::{AppError, DoctorName, validate};
use serde_json::json;
use validator::Validate;

use crate::error::HttpApiError;
use crate::extractors::PatientSession;
use crate::schemas::AppointmentInput;
use crate::state::AppState;

#[post("/api/v1/appointment/post")]
pub async fn post_appointment(
    PatientSession(patient): PatientSession,
    data: web::Data<AppState>,
    payload: web::Json<AppointmentInput>,
) -> Result<HttpResponse, HttpApiError> {
    let payload = payload.into_inner();
    payload
        .validate()
        .map_err(|e| AppError::Validation(validate::error_message(&e)))?;

    // Human-entered name + department must resolve to exactly one doctor.
    let matches = db::find_doctors_by_name(
        &data.db,
        &payload.doctor_first_name,
        &payload.doctor_last_name,
        &payload.department,
    )
    .await?;

    let doctor = match matches.as_slice() {
        [] => return Err(AppError::NotFound("Doctor not found!".to_string()).into()),
        [doctor] => doctor,
        _ => {
            return Err(AppError::Conflict(
                "Doctors Conflict! Please Contact Through Email Or Phone!".to_string(),
            )
            .into());
        }
    };

    let appointment = db::insert_appointment(
        &data.db,
        db::NewAppointment {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            nic: payload.nic,
            dob: payload.dob,
            gender: payload.gender,
            appointment_date: payload.appointment_date,
            department: payload.department,
            // snapshot of the resolved record, not a live reference
            doctor: DoctorName {
                first_name: doctor.first_name.clone(),
                last_name: doctor.last_name.clone(),
            },
            has_visited: payload.has_visited,
            address: payload.address,
            doctor_id: doctor.id,
            patient_id: patient.id,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Appointment Sent Successfully!",
        "appointment": appointment,
    })))
}
