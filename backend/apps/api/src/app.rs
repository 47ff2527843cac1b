//! Application Router
//!
//! Everything is served under `/api`. The booking crate's mutating routes
//! are wrapped in the identity crate's authorization gate.

use axum::{Router, middleware};
use booking::domain::repository::{CatwayRepository, ReservationRepository};
use booking::{BookingConfig, BookingState, PgBookingRepository, booking_router_generic};
use identity::domain::repository::CredentialStore;
use identity::{IdentityConfig, IdentityState, PgCredentialStore, identity_router_generic, require_caller};
use sqlx::PgPool;

/// Build the application on PostgreSQL
pub fn marina_app(pool: PgPool, identity: IdentityConfig, booking: BookingConfig) -> Router {
    marina_app_generic(
        IdentityState::new(PgCredentialStore::new(pool.clone()), identity),
        BookingState::new(PgBookingRepository::new(pool), booking),
    )
}

/// Build the application on any credential store and booking repository
pub fn marina_app_generic<S, R>(identity: IdentityState<S>, booking: BookingState<R>) -> Router
where
    S: CredentialStore + Send + Sync + 'static,
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    let gate = identity.clone();
    let booking = booking_router_generic(booking, move |router: Router<BookingState<R>>| {
        router.route_layer(middleware::from_fn_with_state(gate, require_caller::<S>))
    });

    let api = Router::new()
        .merge(identity_router_generic(identity))
        .merge(booking);

    Router::new().nest("/api", api)
}
