//! HTTP Handlers

use axum::Extension;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::caller::Caller;

use crate::application::{
    AvailabilityUseCase, CancelReservationUseCase, CatwayAdminUseCase, CatwayUpdateInput,
    CreateCatwayInput, ReservationQueryUseCase, ReserveInput, ReserveUseCase,
};
use crate::domain::entities::{Catway, Reservation};
use crate::domain::repository::{CatwayRepository, ReservationRepository};
use crate::domain::value_objects::{CatwayId, CatwayNumber, ReservationId};
use crate::error::{BookingError, BookingResult};
use crate::presentation::dto::{
    AvailabilityQuery, CreateCatwayRequest, CreateReservationRequest, UpdateCatwayRequest,
    parse_instant,
};
use crate::presentation::state::BookingState;

// ============================================================================
// Catways
// ============================================================================

/// GET /catways
pub async fn list_catways<R>(State(state): State<BookingState<R>>) -> BookingResult<Json<Vec<Catway>>>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    Ok(Json(admin(&state).list().await?))
}

/// GET /catways/available
pub async fn list_available<R>(
    State(state): State<BookingState<R>>,
    Query(query): Query<AvailabilityQuery>,
) -> BookingResult<Json<Vec<Catway>>>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let window = query.window()?;
    let use_case = AvailabilityUseCase::new(state.repo.clone(), state.config.clone());
    Ok(Json(use_case.list_available(window).await?))
}

/// GET /catways/{id}
pub async fn get_catway<R>(
    State(state): State<BookingState<R>>,
    Path(id): Path<String>,
) -> BookingResult<Json<Catway>>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let id = parse_catway_id(&id)?;
    Ok(Json(admin(&state).get(&id).await?))
}

/// POST /catways
pub async fn create_catway<R>(
    State(state): State<BookingState<R>>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<CreateCatwayRequest>,
) -> BookingResult<(StatusCode, Json<Catway>)>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let catway = admin(&state)
        .create(
            &caller,
            CreateCatwayInput {
                catway_number: req.catway_number,
                catway_type: req.catway_type,
                catway_state: req.catway_state,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(catway)))
}

/// PATCH /catways/{id}
pub async fn update_catway<R>(
    State(state): State<BookingState<R>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCatwayRequest>,
) -> BookingResult<Json<Catway>>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let id = parse_catway_id(&id)?;
    let catway = admin(&state)
        .update(
            &caller,
            &id,
            CatwayUpdateInput {
                catway_type: req.catway_type,
                catway_state: req.catway_state,
            },
        )
        .await?;

    Ok(Json(catway))
}

/// DELETE /catways/{id}
pub async fn delete_catway<R>(
    State(state): State<BookingState<R>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> BookingResult<StatusCode>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let id = parse_catway_id(&id)?;
    admin(&state).delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Reservations
// ============================================================================

/// GET /catways/{id}/reservations
pub async fn list_catway_reservations<R>(
    State(state): State<BookingState<R>>,
    Path(id): Path<String>,
) -> BookingResult<Json<Vec<Reservation>>>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let id = parse_catway_id(&id)?;
    Ok(Json(queries(&state).list_for_catway(&id).await?))
}

/// POST /catways/{id}/reservations
pub async fn create_reservation<R>(
    State(state): State<BookingState<R>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Json(req): Json<CreateReservationRequest>,
) -> BookingResult<(StatusCode, Json<Reservation>)>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let catway_id = parse_catway_id(&id)?;
    let use_case = ReserveUseCase::new(
        state.repo.clone(),
        state.locks.clone(),
        state.config.clone(),
    );

    let reservation = use_case
        .execute(
            &caller,
            ReserveInput {
                catway_id,
                client_name: req.client_name,
                boat_name: req.boat_name,
                check_in: parse_instant(&req.check_in)?,
                check_out: parse_instant(&req.check_out)?,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /catways/{number}/reservations/{reservation_id}
pub async fn get_reservation<R>(
    State(state): State<BookingState<R>>,
    Path((number, reservation_id)): Path<(String, String)>,
) -> BookingResult<Json<Reservation>>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let number: CatwayNumber = number.parse()?;
    let id = parse_reservation_id(&reservation_id)?;
    Ok(Json(queries(&state).get(number, &id).await?))
}

/// DELETE /catways/{number}/reservations/{reservation_id}
pub async fn cancel_reservation<R>(
    State(state): State<BookingState<R>>,
    Extension(caller): Extension<Caller>,
    Path((number, reservation_id)): Path<(String, String)>,
) -> BookingResult<StatusCode>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let number: CatwayNumber = number.parse()?;
    let id = parse_reservation_id(&reservation_id)?;
    let use_case = CancelReservationUseCase::new(
        state.repo.clone(),
        state.locks.clone(),
        state.config.clone(),
    );

    use_case.execute(&caller, number, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /reservations
pub async fn list_reservations<R>(
    State(state): State<BookingState<R>>,
) -> BookingResult<Json<Vec<Reservation>>>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    Ok(Json(queries(&state).list_all().await?))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn admin<R>(state: &BookingState<R>) -> CatwayAdminUseCase<R>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    CatwayAdminUseCase::new(
        state.repo.clone(),
        state.locks.clone(),
        state.config.clone(),
    )
}

fn queries<R>(state: &BookingState<R>) -> ReservationQueryUseCase<R>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    ReservationQueryUseCase::new(state.repo.clone(), state.config.clone())
}

fn parse_catway_id(raw: &str) -> BookingResult<CatwayId> {
    raw.parse()
        .map_err(|_| BookingError::InvalidInput("Malformed catway id".into()))
}

fn parse_reservation_id(raw: &str) -> BookingResult<ReservationId> {
    raw.parse()
        .map_err(|_| BookingError::InvalidInput("Malformed reservation id".into()))
}
