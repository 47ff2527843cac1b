//! PostgreSQL Booking Repository
//!
//! Schema: `database/migrations/0002_booking.sql`. The `reservations` table
//! carries an exclusion constraint on `(catway_number, [check_in, check_out))`,
//! so an overlapping insert from another process surfaces as `Conflict`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Catway, NewCatway, NewReservation, Reservation};
use crate::domain::repository::{CatwayRepository, ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{CatwayId, CatwayNumber, ReservationId, StayPeriod};
use crate::error::{BookingError, BookingResult};

/// PostgreSQL-backed catway and reservation repository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_CATWAY: &str = r#"
    SELECT
        id,
        catway_number,
        catway_type,
        catway_state,
        created_at
    FROM catways
"#;

const SELECT_RESERVATION: &str = r#"
    SELECT
        id,
        catway_number,
        client_name,
        boat_name,
        check_in,
        check_out,
        created_at
    FROM reservations
"#;

// Every filter field is optional: a NULL parameter disables its predicate
const RESERVATION_FILTER: &str = r#"
    WHERE ($1::uuid IS NULL OR id = $1)
      AND ($2::int4 IS NULL OR catway_number = $2)
      AND ($3::timestamptz IS NULL OR (check_in < $4 AND $3 < check_out))
"#;

fn numbers(numbers: &[CatwayNumber]) -> Vec<i32> {
    numbers.iter().map(CatwayNumber::get).collect()
}

impl CatwayRepository for PgBookingRepository {
    async fn find_by_id(&self, id: &CatwayId) -> BookingResult<Option<Catway>> {
        let row = sqlx::query_as::<_, CatwayRow>(&format!("{SELECT_CATWAY} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(CatwayRow::into_catway).transpose()
    }

    async fn find_by_number(&self, number: CatwayNumber) -> BookingResult<Option<Catway>> {
        let row =
            sqlx::query_as::<_, CatwayRow>(&format!("{SELECT_CATWAY} WHERE catway_number = $1"))
                .bind(number.get())
                .fetch_optional(&self.pool)
                .await?;

        row.map(CatwayRow::into_catway).transpose()
    }

    async fn list_excluding_numbers(&self, excluded: &[CatwayNumber]) -> BookingResult<Vec<Catway>> {
        let rows = sqlx::query_as::<_, CatwayRow>(&format!(
            "{SELECT_CATWAY} WHERE NOT (catway_number = ANY($1)) ORDER BY catway_number"
        ))
        .bind(numbers(excluded))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CatwayRow::into_catway).collect()
    }

    async fn list_all(&self) -> BookingResult<Vec<Catway>> {
        let rows =
            sqlx::query_as::<_, CatwayRow>(&format!("{SELECT_CATWAY} ORDER BY catway_number"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(CatwayRow::into_catway).collect()
    }

    async fn create(&self, catway: NewCatway) -> BookingResult<Catway> {
        let catway = catway.into_catway();

        sqlx::query(
            r#"
            INSERT INTO catways (
                id,
                catway_number,
                catway_type,
                catway_state,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(catway.id.as_uuid())
        .bind(catway.catway_number.get())
        .bind(catway.catway_type.as_str())
        .bind(catway.catway_state.as_deref())
        .bind(catway.created_at)
        .execute(&self.pool)
        .await?;

        Ok(catway)
    }

    async fn update(&self, catway: &Catway) -> BookingResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE catways
            SET catway_type = $2, catway_state = $3
            WHERE id = $1
            "#,
        )
        .bind(catway.id.as_uuid())
        .bind(catway.catway_type.as_str())
        .bind(catway.catway_state.as_deref())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_by_id(&self, id: &CatwayId) -> BookingResult<bool> {
        let deleted = sqlx::query("DELETE FROM catways WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

impl ReservationRepository for PgBookingRepository {
    async fn find(&self, filter: &ReservationFilter) -> BookingResult<Vec<Reservation>> {
        let sql = format!("{SELECT_RESERVATION} {RESERVATION_FILTER} ORDER BY check_in, catway_number");
        let rows = bind_filter(sqlx::query_as::<_, ReservationRow>(&sql), filter)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ReservationRow::into_reservation).collect()
    }

    async fn find_one(&self, filter: &ReservationFilter) -> BookingResult<Option<Reservation>> {
        let sql = format!("{SELECT_RESERVATION} {RESERVATION_FILTER} LIMIT 1");
        let row = bind_filter(sqlx::query_as::<_, ReservationRow>(&sql), filter)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ReservationRow::into_reservation).transpose()
    }

    async fn create(&self, reservation: NewReservation) -> BookingResult<Reservation> {
        let reservation = reservation.into_reservation();

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id,
                catway_number,
                client_name,
                boat_name,
                check_in,
                check_out,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation.id.as_uuid())
        .bind(reservation.catway_number.get())
        .bind(&reservation.client_name)
        .bind(&reservation.boat_name)
        .bind(reservation.period.check_in())
        .bind(reservation.period.check_out())
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn delete_by_id(&self, id: &ReservationId) -> BookingResult<bool> {
        let deleted = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_by_catway(&self, number: CatwayNumber) -> BookingResult<u64> {
        let deleted = sqlx::query("DELETE FROM reservations WHERE catway_number = $1")
            .bind(number.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn distinct_numbers(&self, filter: &ReservationFilter) -> BookingResult<Vec<CatwayNumber>> {
        let sql = format!(
            "SELECT DISTINCT catway_number FROM reservations {RESERVATION_FILTER} ORDER BY catway_number"
        );
        let rows: Vec<(i32,)> = bind_filter(sqlx::query_as(&sql), filter)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(n,)| CatwayNumber::new(n).map_err(|_| corrupt("catway number", n)))
            .collect()
    }
}

type PgQueryAs<'q, O> = sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>;

fn bind_filter<'q, O>(query: PgQueryAs<'q, O>, filter: &ReservationFilter) -> PgQueryAs<'q, O> {
    query
        .bind(filter.id.map(|id| id.into_uuid()))
        .bind(filter.catway_number.map(|n| n.get()))
        .bind(filter.overlapping.map(|p| p.check_in()))
        .bind(filter.overlapping.map(|p| p.check_out()))
}

fn corrupt(what: &str, value: impl std::fmt::Display) -> BookingError {
    BookingError::Internal(format!("corrupt {what} in storage: {value}"))
}

#[derive(sqlx::FromRow)]
struct CatwayRow {
    id: Uuid,
    catway_number: i32,
    catway_type: String,
    catway_state: Option<String>,
    created_at: DateTime<Utc>,
}

impl CatwayRow {
    fn into_catway(self) -> BookingResult<Catway> {
        Ok(Catway {
            id: CatwayId::from_uuid(self.id),
            catway_number: CatwayNumber::new(self.catway_number)
                .map_err(|_| corrupt("catway number", self.catway_number))?,
            catway_type: self
                .catway_type
                .parse()
                .map_err(|_| corrupt("catway type", &self.catway_type))?,
            catway_state: self.catway_state,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    catway_number: i32,
    client_name: String,
    boat_name: String,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl ReservationRow {
    fn into_reservation(self) -> BookingResult<Reservation> {
        Ok(Reservation {
            id: ReservationId::from_uuid(self.id),
            catway_number: CatwayNumber::new(self.catway_number)
                .map_err(|_| corrupt("catway number", self.catway_number))?,
            period: StayPeriod::new(self.check_in, self.check_out)
                .map_err(|_| corrupt("stay period for reservation", self.id))?,
            client_name: self.client_name,
            boat_name: self.boat_name,
            created_at: self.created_at,
        })
    }
}
