use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use common::{Appointment, AppointmentStatus, Avatar, DoctorName, Gender, Message, Role, User};
use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Db(pub PgPool);

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("corrupt row: {0}")]
    Decode(#[from] common::ParseEnumError),
}

impl DbError {
    /// Constraint name when the driver reported a unique-key violation, so
    /// callers can translate races on unique columns without touching sqlx.
    pub fn unique_violation(&self) -> Option<String> {
        if let DbError::Sqlx(sqlx::Error::Database(e)) = self {
            if e.code().as_deref() == Some("23505") {
                return Some(e.constraint().unwrap_or("unique").to_string());
            }
        }
        None
    }
}

pub async fn connect(database_url: &str, max: u32) -> Result<Db, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(max)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(Db(pool))
}

pub async fn migrate(db: &Db) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(&db.0).await?;
    Ok(())
}

// ==== Rows ====

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone, nic, dob, gender, \
     password_hash, role, doctor_department, avatar_public_id, avatar_url";

#[derive(sqlx::FromRow, Debug, Clone)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    nic: String,
    dob: NaiveDate,
    gender: String,
    password_hash: String,
    role: String,
    doctor_department: Option<String>,
    avatar_public_id: Option<String>,
    avatar_url: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let doc_avatar = match (row.avatar_public_id, row.avatar_url) {
            (Some(public_id), Some(url)) => Some(Avatar { public_id, url }),
            _ => None,
        };
        Ok(User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            nic: row.nic,
            dob: row.dob,
            gender: Gender::from_str(&row.gender)?,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role)?,
            doctor_department: row.doctor_department,
            doc_avatar,
        })
    }
}

#[derive(sqlx::FromRow, Debug, Clone)]
struct AppointmentRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    nic: String,
    dob: NaiveDate,
    gender: String,
    appointment_date: String,
    department: String,
    doctor_first_name: String,
    doctor_last_name: String,
    has_visited: bool,
    address: String,
    doctor_id: Uuid,
    patient_id: Uuid,
    status: String,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            nic: row.nic,
            dob: row.dob,
            gender: Gender::from_str(&row.gender)?,
            appointment_date: row.appointment_date,
            department: row.department,
            doctor: DoctorName {
                first_name: row.doctor_first_name,
                last_name: row.doctor_last_name,
            },
            has_visited: row.has_visited,
            address: row.address,
            doctor_id: row.doctor_id,
            patient_id: row.patient_id,
            status: AppointmentStatus::from_str(&row.status)?,
        })
    }
}

#[derive(sqlx::FromRow, Debug, Clone)]
struct MessageRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    message: String,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            message: row.message,
        }
    }
}

// ==== Users ====

pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub password_hash: String,
    pub role: Role,
    pub doctor_department: Option<String>,
    pub doc_avatar: Option<Avatar>,
}

pub async fn find_user_by_email(db: &Db, email: &str) -> Result<Option<User>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(&db.0)
    .await?;
    row.map(User::try_from).transpose()
}

pub async fn find_user_by_id(db: &Db, id: Uuid) -> Result<Option<User>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&db.0)
    .await?;
    row.map(User::try_from).transpose()
}

pub async fn insert_user(db: &Db, new: NewUser) -> Result<User, DbError> {
    let (avatar_public_id, avatar_url) = match &new.doc_avatar {
        Some(a) => (Some(a.public_id.clone()), Some(a.url.clone())),
        None => (None, None),
    };
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (id, first_name, last_name, email, phone, nic, dob, gender, \
             password_hash, role, doctor_department, avatar_public_id, avatar_url)
         VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.nic)
    .bind(new.dob)
    .bind(new.gender.as_str())
    .bind(&new.password_hash)
    .bind(new.role.as_str())
    .bind(&new.doctor_department)
    .bind(avatar_public_id)
    .bind(avatar_url)
    .fetch_one(&db.0)
    .await?;
    User::try_from(row)
}

pub async fn list_doctors(db: &Db) -> Result<Vec<User>, DbError> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE role = 'Doctor' ORDER BY first_name, last_name"
    ))
    .fetch_all(&db.0)
    .await?;
    rows.into_iter().map(User::try_from).collect()
}

/// Doctor-resolution lookup: exact match on name and department, Doctor role
/// only. Names are not a unique key; the caller decides what multiple matches
/// mean.
pub async fn find_doctors_by_name(
    db: &Db,
    first_name: &str,
    last_name: &str,
    department: &str,
) -> Result<Vec<User>, DbError> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE role = 'Doctor' AND first_name = $1 AND last_name = $2 AND doctor_department = $3"
    ))
    .bind(first_name)
    .bind(last_name)
    .bind(department)
    .fetch_all(&db.0)
    .await?;
    rows.into_iter().map(User::try_from).collect()
}

// ==== Appointments ====

pub struct NewAppointment {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nic: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub appointment_date: String,
    pub department: String,
    pub doctor: DoctorName,
    pub has_visited: bool,
    pub address: String,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
}

pub async fn insert_appointment(db: &Db, new: NewAppointment) -> Result<Appointment, DbError> {
    let row = sqlx::query_as::<_, AppointmentRow>(
        "INSERT INTO appointments (id, first_name, last_name, email, phone, nic, dob, gender, \
             appointment_date, department, doctor_first_name, doctor_last_name, has_visited, \
             address, doctor_id, patient_id, status)
         VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17)
         RETURNING id, first_name, last_name, email, phone, nic, dob, gender, appointment_date, \
             department, doctor_first_name, doctor_last_name, has_visited, address, doctor_id, \
             patient_id, status",
    )
    .bind(Uuid::new_v4())
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.nic)
    .bind(new.dob)
    .bind(new.gender.as_str())
    .bind(&new.appointment_date)
    .bind(&new.department)
    .bind(&new.doctor.first_name)
    .bind(&new.doctor.last_name)
    .bind(new.has_visited)
    .bind(&new.address)
    .bind(new.doctor_id)
    .bind(new.patient_id)
    .bind(AppointmentStatus::default().as_str())
    .fetch_one(&db.0)
    .await?;
    Appointment::try_from(row)
}

// ==== Messages ====

pub struct NewMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

pub async fn insert_message(db: &Db, new: NewMessage) -> Result<Message, DbError> {
    let row = sqlx::query_as::<_, MessageRow>(
        "INSERT INTO messages (id, first_name, last_name, email, phone, message)
         VALUES ($1,$2,$3,$4,$5,$6)
         RETURNING id, first_name, last_name, email, phone, message",
    )
    .bind(Uuid::new_v4())
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.message)
    .fetch_one(&db.0)
    .await?;
    Ok(Message::from(row))
}

pub async fn list_messages(db: &Db) -> Result<Vec<Message>, DbError> {
    let rows = sqlx::query_as::<_, MessageRow>(
        "SELECT id, first_name, last_name, email, phone, message FROM messages",
    )
    .fetch_all(&db.0)
    .await?;
    Ok(rows.into_iter().map(Message::from).collect())
}
