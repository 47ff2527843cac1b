//! Booking Router

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use sqlx::PgPool;

use crate::application::config::BookingConfig;
use crate::domain::repository::{CatwayRepository, ReservationRepository};
use crate::infra::postgres::PgBookingRepository;
use crate::presentation::handlers;
use crate::presentation::state::BookingState;

/// Create the Booking router with the PostgreSQL repository
///
/// `guard` wraps the mutating routes; it must insert a
/// [`kernel::caller::Caller`] extension or reject the request.
pub fn booking_router<G>(pool: PgPool, config: BookingConfig, guard: G) -> Router
where
    G: FnOnce(Router<BookingState<PgBookingRepository>>) -> Router<BookingState<PgBookingRepository>>,
{
    booking_router_generic(
        BookingState::new(PgBookingRepository::new(pool), config),
        guard,
    )
}

/// Create a generic Booking router for any repository
///
/// Reads are public. Creating, changing and deleting catways and
/// reservations go through `guard`.
pub fn booking_router_generic<R, G>(state: BookingState<R>, guard: G) -> Router
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
    G: FnOnce(Router<BookingState<R>>) -> Router<BookingState<R>>,
{
    let public = Router::new()
        .route("/catways", get(handlers::list_catways::<R>))
        .route("/catways/available", get(handlers::list_available::<R>))
        .route("/catways/{id}", get(handlers::get_catway::<R>))
        .route(
            "/catways/{id}/reservations",
            get(handlers::list_catway_reservations::<R>),
        )
        .route(
            "/catways/{id}/reservations/{reservation_id}",
            get(handlers::get_reservation::<R>),
        )
        .route("/reservations", get(handlers::list_reservations::<R>));

    // On the reservation item route `{id}` is the catway number
    let protected = guard(
        Router::new()
            .route("/catways", post(handlers::create_catway::<R>))
            .route(
                "/catways/{id}",
                patch(handlers::update_catway::<R>)
                    .delete(handlers::delete_catway::<R>),
            )
            .route(
                "/catways/{id}/reservations",
                post(handlers::create_reservation::<R>),
            )
            .route(
                "/catways/{id}/reservations/{reservation_id}",
                delete(handlers::cancel_reservation::<R>),
            ),
    );

    public.merge(protected).with_state(state)
}
