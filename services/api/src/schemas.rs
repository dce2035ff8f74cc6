use std::str::FromStr;

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use chrono::NaiveDate;
use common::validate::all_digits;
use common::{AppError, Gender, Role};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 3, message = "First Name must be at least 3 characters!"))]
    pub first_name: String,
    #[validate(length(min = 3, message = "Last Name must be at least 3 characters!"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(
        length(equal = 11, message = "Phone number must be 11 digits!"),
        custom(function = all_digits, message = "Phone number must be 11 digits!")
    )]
    pub phone: String,
    #[validate(
        length(equal = 12, message = "NIC must be 12 digits!"),
        custom(function = all_digits, message = "NIC must be 12 digits!")
    )]
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    #[validate(length(min = 8, message = "Password must contain at least 8 characters!"))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAdminInput {
    #[validate(length(min = 3, message = "First Name must be at least 3 characters!"))]
    pub first_name: String,
    #[validate(length(min = 3, message = "Last Name must be at least 3 characters!"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(
        length(equal = 11, message = "Phone number must be 11 digits!"),
        custom(function = all_digits, message = "Phone number must be 11 digits!")
    )]
    pub phone: String,
    #[validate(
        length(equal = 12, message = "NIC must be 12 digits!"),
        custom(function = all_digits, message = "NIC must be 12 digits!")
    )]
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    #[validate(length(min = 8, message = "Password must contain at least 8 characters!"))]
    pub password: String,
}

/// Validated doctor-provisioning fields, once lifted out of the multipart
/// form.
#[derive(Debug, Validate)]
pub struct DoctorInput {
    #[validate(length(min = 3, message = "First Name must be at least 3 characters!"))]
    pub first_name: String,
    #[validate(length(min = 3, message = "Last Name must be at least 3 characters!"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(
        length(equal = 11, message = "Phone number must be 11 digits!"),
        custom(function = all_digits, message = "Phone number must be 11 digits!")
    )]
    pub phone: String,
    #[validate(
        length(equal = 12, message = "NIC must be 12 digits!"),
        custom(function = all_digits, message = "NIC must be 12 digits!")
    )]
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    #[validate(length(min = 8, message = "Password must contain at least 8 characters!"))]
    pub password: String,
    #[validate(length(min = 1, message = "Please Fill Full Form!"))]
    pub doctor_department: String,
}

/// Raw doctor-provisioning form. Every field is optional at the transport
/// layer so completeness failures surface as the form-level message rather
/// than a framework 400.
#[derive(Debug, MultipartForm)]
pub struct NewDoctorForm {
    #[multipart(rename = "docAvatar")]
    pub doc_avatar: Option<TempFile>,
    #[multipart(rename = "firstName")]
    pub first_name: Option<Text<String>>,
    #[multipart(rename = "lastName")]
    pub last_name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub phone: Option<Text<String>>,
    pub nic: Option<Text<String>>,
    pub dob: Option<Text<String>>,
    pub gender: Option<Text<String>>,
    pub password: Option<Text<String>>,
    #[multipart(rename = "doctorDepartment")]
    pub doctor_department: Option<Text<String>>,
}

impl NewDoctorForm {
    /// Completeness check plus date/enum parsing. The avatar file is expected
    /// to have been taken out of the form already.
    pub fn into_input(self) -> Result<DoctorInput, AppError> {
        let (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(phone),
            Some(nic),
            Some(dob),
            Some(gender),
            Some(password),
            Some(doctor_department),
        ) = (
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.nic,
            self.dob,
            self.gender,
            self.password,
            self.doctor_department,
        )
        else {
            return Err(AppError::Validation("Please Fill Full Form!".to_string()));
        };

        let dob = NaiveDate::parse_from_str(&dob.0, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid dob".to_string()))?;
        let gender = Gender::from_str(&gender.0)
            .map_err(|e| AppError::Validation(format!("Invalid {}", e.field)))?;

        Ok(DoctorInput {
            first_name: first_name.0,
            last_name: last_name.0,
            email: email.0,
            phone: phone.0,
            nic: nic.0,
            dob,
            gender,
            password: password.0,
            doctor_department: doctor_department.0,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInput {
    #[validate(length(min = 3, message = "First Name must be at least 3 characters!"))]
    pub first_name: String,
    #[validate(length(min = 3, message = "Last Name must be at least 3 characters!"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(
        length(equal = 11, message = "Phone number must be 11 digits!"),
        custom(function = all_digits, message = "Phone number must be 11 digits!")
    )]
    pub phone: String,
    #[validate(
        length(equal = 12, message = "NIC must be 12 digits!"),
        custom(function = all_digits, message = "NIC must be 12 digits!")
    )]
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    // stored verbatim, deliberately not parsed as a date
    #[serde(rename = "appointment_date")]
    #[validate(length(min = 1, message = "Please Fill Full Form!"))]
    pub appointment_date: String,
    #[validate(length(min = 1, message = "Please Fill Full Form!"))]
    pub department: String,
    #[serde(rename = "doctor_firstName")]
    #[validate(length(min = 1, message = "Please Fill Full Form!"))]
    pub doctor_first_name: String,
    #[serde(rename = "doctor_lastName")]
    #[validate(length(min = 1, message = "Please Fill Full Form!"))]
    pub doctor_last_name: String,
    #[serde(default)]
    pub has_visited: bool,
    #[validate(length(min = 1, message = "Please Fill Full Form!"))]
    pub address: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageInput {
    #[validate(length(min = 3, message = "First Name must be at least 3 characters!"))]
    pub first_name: String,
    #[validate(length(min = 3, message = "Last Name must be at least 3 characters!"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(
        length(equal = 11, message = "Phone number must be 11 digits!"),
        custom(function = all_digits, message = "Phone number must be 11 digits!")
    )]
    pub phone: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters!"))]
    pub message: String,
}
