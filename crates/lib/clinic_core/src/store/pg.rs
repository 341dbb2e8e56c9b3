//! PostgreSQL record store.
//!
//! Every call is bounded by `op_timeout`; an expired call surfaces as
//! [`StoreError::Timeout`] and is not retried.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::warn;
use uuid::Uuid;

use super::{
    BookingConflict, BookingInsert, ClinicStore, StoreError, StoreResult, UpdateOutcome,
    UserInsert,
};
use crate::models::{
    Booking, ContactMessage, Doctor, Payment, Role, Specialty, TreatmentOption, User,
};

/// Default bound on a single store call.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(10);

const BOOKING_COLUMNS: &str =
    "id, appointment_date, treatment, patient, slot, email, phone, price";

/// Store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, DEFAULT_OP_TIMEOUT)
    }

    pub fn with_timeout(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn timed<T, F>(&self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => {
                warn!(timeout = ?self.op_timeout, "store call timed out");
                Err(StoreError::Timeout(self.op_timeout))
            }
        }
    }
}

#[async_trait]
impl ClinicStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        self.timed(sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }

    async fn list_treatments(&self) -> StoreResult<Vec<TreatmentOption>> {
        self.timed(
            sqlx::query_as::<_, TreatmentOption>(
                "SELECT id, name, slots, price FROM appointment_options ORDER BY name",
            )
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn list_specialties(&self) -> StoreResult<Vec<Specialty>> {
        let names = self
            .timed(
                sqlx::query_scalar::<_, String>(
                    "SELECT name FROM appointment_options ORDER BY name",
                )
                .fetch_all(&self.pool),
            )
            .await?;
        Ok(names.into_iter().map(|name| Specialty { name }).collect())
    }

    async fn find_treatment(&self, name: &str) -> StoreResult<Option<TreatmentOption>> {
        self.timed(
            sqlx::query_as::<_, TreatmentOption>(
                "SELECT id, name, slots, price FROM appointment_options WHERE name = $1",
            )
            .bind(name)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn upsert_treatment(&self, option: TreatmentOption) -> StoreResult<TreatmentOption> {
        option.validate()?;
        self.timed(
            sqlx::query_as::<_, TreatmentOption>(
                r#"
                INSERT INTO appointment_options (id, name, slots, price)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (name)
                DO UPDATE SET slots = EXCLUDED.slots, price = EXCLUDED.price
                RETURNING id, name, slots, price
                "#,
            )
            .bind(option.id)
            .bind(&option.name)
            .bind(&option.slots)
            .bind(option.price)
            .fetch_one(&self.pool),
        )
        .await
    }

    async fn available_treatments(&self, date: &str) -> StoreResult<Vec<TreatmentOption>> {
        self.timed(
            sqlx::query_as::<_, TreatmentOption>(
                r#"
                SELECT o.id, o.name, o.price,
                       ARRAY(
                           SELECT s.slot
                           FROM (
                               SELECT u.slot, min(u.ord) AS ord
                               FROM unnest(o.slots) WITH ORDINALITY AS u(slot, ord)
                               GROUP BY u.slot
                           ) AS s
                           WHERE NOT EXISTS (
                               SELECT 1 FROM bookings b
                               WHERE b.appointment_date = $1
                                 AND b.treatment = o.name
                                 AND b.slot = s.slot
                           )
                           ORDER BY s.ord
                       ) AS slots
                FROM appointment_options o
                ORDER BY o.name
                "#,
            )
            .bind(date)
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn bookings_on(&self, date: &str) -> StoreResult<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE appointment_date = $1 ORDER BY id"
        );
        self.timed(
            sqlx::query_as::<_, Booking>(&sql)
                .bind(date)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn bookings_for(&self, email: &str) -> StoreResult<Vec<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE email = $1 ORDER BY id");
        self.timed(
            sqlx::query_as::<_, Booking>(&sql)
                .bind(email)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn find_booking(&self, id: Uuid) -> StoreResult<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        self.timed(
            sqlx::query_as::<_, Booking>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn insert_booking_if_absent(&self, booking: Booking) -> StoreResult<BookingInsert> {
        // Both unique constraints are enforced by the table; DO NOTHING
        // without a target covers either of them.
        let sql = format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT DO NOTHING \
             RETURNING {BOOKING_COLUMNS}"
        );
        let inserted = self
            .timed(
                sqlx::query_as::<_, Booking>(&sql)
                    .bind(booking.id)
                    .bind(&booking.appointment_date)
                    .bind(&booking.treatment)
                    .bind(&booking.patient)
                    .bind(&booking.slot)
                    .bind(&booking.email)
                    .bind(&booking.phone)
                    .bind(booking.price)
                    .fetch_optional(&self.pool),
            )
            .await?;

        if let Some(row) = inserted {
            return Ok(BookingInsert::Inserted(row));
        }

        // Only used to pick the message; the write itself was already refused.
        let same_patient = self
            .timed(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM bookings \
                     WHERE email = $1 AND appointment_date = $2 AND treatment = $3)",
                )
                .bind(&booking.email)
                .bind(&booking.appointment_date)
                .bind(&booking.treatment)
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(BookingInsert::Rejected(if same_patient {
            BookingConflict::SamePatient
        } else {
            BookingConflict::SlotTaken
        }))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.timed(
            sqlx::query_as::<_, User>("SELECT id, name, email, role FROM users ORDER BY id")
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.timed(
            sqlx::query_as::<_, User>("SELECT id, name, email, role FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn insert_user_if_absent(&self, user: User) -> StoreResult<UserInsert> {
        let row = self
            .timed(
                sqlx::query_as::<_, User>(
                    "INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4) \
                     ON CONFLICT (email) DO NOTHING \
                     RETURNING id, name, email, role",
                )
                .bind(user.id)
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.role)
                .fetch_optional(&self.pool),
            )
            .await?;
        Ok(row.map_or(UserInsert::AlreadyExists, UserInsert::Inserted))
    }

    async fn set_user_role(
        &self,
        id: Uuid,
        role: Role,
        upsert: bool,
    ) -> StoreResult<UpdateOutcome> {
        let pool = &self.pool;
        self.timed(async move {
            let mut tx = pool.begin().await?;

            let current = sqlx::query_scalar::<_, Role>(
                "SELECT role FROM users WHERE id = $1 FOR UPDATE",
            )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

            let outcome = match current {
                Some(existing) if existing == role => UpdateOutcome::modified(false),
                Some(_) => {
                    sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
                        .bind(id)
                        .bind(role)
                        .execute(&mut *tx)
                        .await?;
                    UpdateOutcome::modified(true)
                }
                None if upsert => {
                    sqlx::query(
                        "INSERT INTO users (id, role) VALUES ($1, $2) \
                         ON CONFLICT (id) DO UPDATE SET role = EXCLUDED.role",
                    )
                    .bind(id)
                    .bind(role)
                    .execute(&mut *tx)
                    .await?;
                    UpdateOutcome::upserted(id)
                }
                None => UpdateOutcome::default(),
            };

            tx.commit().await?;
            Ok::<_, sqlx::Error>(outcome)
        })
        .await
    }

    async fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        self.timed(
            sqlx::query_as::<_, Doctor>("SELECT id, name, email, img FROM doctors ORDER BY id")
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn insert_doctor(&self, doctor: Doctor) -> StoreResult<Doctor> {
        self.timed(
            sqlx::query("INSERT INTO doctors (id, name, email, img) VALUES ($1, $2, $3, $4)")
                .bind(doctor.id)
                .bind(&doctor.name)
                .bind(&doctor.email)
                .bind(&doctor.img)
                .execute(&self.pool),
        )
        .await?;
        Ok(doctor)
    }

    async fn delete_doctor(&self, id: Uuid) -> StoreResult<u64> {
        let result = self
            .timed(
                sqlx::query("DELETE FROM doctors WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_contact(&self, message: ContactMessage) -> StoreResult<ContactMessage> {
        self.timed(
            sqlx::query(
                "INSERT INTO contact_messages (id, name, email, subject, message) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(message.id)
            .bind(&message.name)
            .bind(&message.email)
            .bind(&message.subject)
            .bind(&message.message)
            .execute(&self.pool),
        )
        .await?;
        Ok(message)
    }

    async fn insert_payment(&self, payment: Payment) -> StoreResult<Payment> {
        self.timed(
            sqlx::query(
                "INSERT INTO payments (id, payment_method_id, booking) VALUES ($1, $2, $3)",
            )
            .bind(payment.id)
            .bind(&payment.payment_method_id)
            .bind(Json(&payment.booking))
            .execute(&self.pool),
        )
        .await?;
        Ok(payment)
    }
}
