//! Use-case tests for the booking crate

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use kernel::caller::Caller;
use kernel::id::UserId;

use crate::application::config::{AvailabilityPolicy, BookingConfig, CatwayDeletionPolicy};
use crate::application::lock::CatwayLocks;
use crate::application::{
    AvailabilityUseCase, CancelReservationUseCase, CatwayAdminUseCase, CatwayUpdateInput,
    CreateCatwayInput, ReservationQueryUseCase, ReserveInput, ReserveUseCase,
};
use crate::domain::entities::{Catway, NewCatway, NewReservation, Reservation};
use crate::domain::repository::{CatwayRepository, ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{CatwayId, CatwayNumber, ReservationId, StayPeriod};
use crate::error::{BookingError, BookingResult};
use crate::infra::memory::InMemoryBookingStore;

fn day(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 0, 0, 0).unwrap()
}

fn config_with(availability: AvailabilityPolicy, deletion: CatwayDeletionPolicy) -> Arc<BookingConfig> {
    Arc::new(BookingConfig {
        availability,
        deletion,
        storage_timeout: Duration::from_secs(2),
    })
}

fn test_config() -> Arc<BookingConfig> {
    config_with(AvailabilityPolicy::IntervalOverlap, CatwayDeletionPolicy::Retain)
}

fn caller() -> Caller {
    Caller::new(UserId::new())
}

/// Store, lock registry and config shared by one test
struct Harbour {
    store: Arc<InMemoryBookingStore>,
    locks: Arc<CatwayLocks>,
    config: Arc<BookingConfig>,
}

impl Harbour {
    fn new(config: Arc<BookingConfig>) -> Self {
        Self {
            store: Arc::new(InMemoryBookingStore::new()),
            locks: Arc::new(CatwayLocks::new()),
            config,
        }
    }

    fn admin(&self) -> CatwayAdminUseCase<InMemoryBookingStore> {
        CatwayAdminUseCase::new(self.store.clone(), self.locks.clone(), self.config.clone())
    }

    fn reserve_use_case(&self) -> ReserveUseCase<InMemoryBookingStore> {
        ReserveUseCase::new(self.store.clone(), self.locks.clone(), self.config.clone())
    }

    fn cancel_use_case(&self) -> CancelReservationUseCase<InMemoryBookingStore> {
        CancelReservationUseCase::new(self.store.clone(), self.locks.clone(), self.config.clone())
    }

    fn queries(&self) -> ReservationQueryUseCase<InMemoryBookingStore> {
        ReservationQueryUseCase::new(self.store.clone(), self.config.clone())
    }

    fn availability(&self) -> AvailabilityUseCase<InMemoryBookingStore> {
        AvailabilityUseCase::new(self.store.clone(), self.config.clone())
    }

    async fn catway(&self, number: i32) -> Catway {
        self.admin()
            .create(
                &caller(),
                CreateCatwayInput {
                    catway_number: number,
                    catway_type: "long".into(),
                    catway_state: Some("good".into()),
                },
            )
            .await
            .unwrap()
    }

    async fn reserve(
        &self,
        catway: &Catway,
        from: (u32, u32),
        to: (u32, u32),
    ) -> BookingResult<Reservation> {
        self.reserve_use_case()
            .execute(&caller(), stay(catway.id, from, to))
            .await
    }

    async fn available_numbers(&self, window: Option<StayPeriod>) -> Vec<i32> {
        self.availability()
            .list_available(window)
            .await
            .unwrap()
            .iter()
            .map(|c| c.catway_number.get())
            .collect()
    }
}

fn stay(catway_id: CatwayId, from: (u32, u32), to: (u32, u32)) -> ReserveInput {
    ReserveInput {
        catway_id,
        client_name: "Tabarly".into(),
        boat_name: "Pen Duick".into(),
        check_in: day(from.0, from.1),
        check_out: day(to.0, to.1),
    }
}

#[cfg(test)]
mod reserve_tests {
    use super::*;

    #[tokio::test]
    async fn test_overlap_conflicts_touching_succeeds() {
        let harbour = Harbour::new(test_config());
        let catway = harbour.catway(1).await;

        harbour.reserve(&catway, (3, 1), (3, 10)).await.unwrap();

        let inside = harbour.reserve(&catway, (3, 5), (3, 7)).await;
        let err = inside.unwrap_err();
        assert!(matches!(err, BookingError::Conflict(_)));
        assert_eq!(err.to_app_error().status_code(), 409);

        harbour.reserve(&catway, (3, 10), (3, 15)).await.unwrap();
        harbour.reserve(&catway, (2, 20), (3, 1)).await.unwrap();
        assert_eq!(harbour.store.reservation_count().await, 3);
    }

    #[tokio::test]
    async fn test_other_catway_is_not_affected() {
        let harbour = Harbour::new(test_config());
        let one = harbour.catway(1).await;
        let two = harbour.catway(2).await;

        harbour.reserve(&one, (3, 1), (3, 10)).await.unwrap();
        assert!(harbour.reserve(&two, (3, 1), (3, 10)).await.is_ok());
    }

    #[tokio::test]
    async fn test_whole_catway_policy_blocks_any_period() {
        let harbour = Harbour::new(config_with(
            AvailabilityPolicy::WholeCatway,
            CatwayDeletionPolicy::Retain,
        ));
        let catway = harbour.catway(1).await;

        harbour.reserve(&catway, (3, 1), (3, 10)).await.unwrap();
        assert!(matches!(
            harbour.reserve(&catway, (6, 1), (6, 10)).await,
            Err(BookingError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let harbour = Harbour::new(test_config());
        let catway = harbour.catway(1).await;

        assert!(matches!(
            harbour.reserve(&catway, (3, 10), (3, 1)).await,
            Err(BookingError::InvalidRange)
        ));
        assert!(matches!(
            harbour.reserve(&catway, (3, 1), (3, 1)).await,
            Err(BookingError::InvalidRange)
        ));

        let blank_boat = harbour
            .reserve_use_case()
            .execute(
                &caller(),
                ReserveInput {
                    boat_name: "   ".into(),
                    ..stay(catway.id, (3, 1), (3, 2))
                },
            )
            .await;
        assert!(matches!(blank_boat, Err(BookingError::InvalidInput(_))));

        let unknown = harbour
            .reserve_use_case()
            .execute(&caller(), stay(CatwayId::new(), (3, 1), (3, 2)))
            .await;
        assert!(matches!(unknown, Err(BookingError::CatwayNotFound)));

        assert_eq!(harbour.store.reservation_count().await, 0);
    }

    #[tokio::test]
    async fn test_stores_catway_number_and_trimmed_names() {
        let harbour = Harbour::new(test_config());
        let catway = harbour.catway(42).await;

        let reservation = harbour
            .reserve_use_case()
            .execute(
                &caller(),
                ReserveInput {
                    client_name: "  Autissier ".into(),
                    ..stay(catway.id, (5, 1), (5, 3))
                },
            )
            .await
            .unwrap();

        assert_eq!(reservation.catway_number.get(), 42);
        assert_eq!(reservation.client_name, "Autissier");
    }
}

#[cfg(test)]
mod concurrency_tests {
    use super::*;

    const RACERS: usize = 16;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_overlapping_creates_yield_one_success() {
        let harbour = Arc::new(Harbour::new(test_config()));
        let catway = harbour.catway(7).await;

        let handles: Vec<_> = (0..RACERS)
            .map(|i| {
                let harbour = harbour.clone();
                let catway_id = catway.id;
                // Every range contains March 10th, so all pairs overlap
                let from = (3, 1 + (i % 9) as u32);
                let to = (3, 11 + (i % 5) as u32);
                tokio::spawn(async move {
                    harbour
                        .reserve_use_case()
                        .execute(&caller(), stay(catway_id, from, to))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(BookingError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, RACERS - 1);
        assert_eq!(harbour.store.reservation_count().await, 1);
        assert_eq!(harbour.locks.active_slots(), 0);
    }

    #[tokio::test]
    async fn test_reserve_queued_behind_deletion_sees_missing_catway() {
        let harbour = Arc::new(Harbour::new(test_config()));
        let catway = harbour.catway(5).await;

        let held = harbour
            .locks
            .acquire(catway.catway_number, Duration::from_secs(1))
            .await
            .unwrap();

        let deletion = {
            let harbour = harbour.clone();
            let catway_id = catway.id;
            tokio::spawn(async move { harbour.admin().delete(&caller(), &catway_id).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let booking = {
            let harbour = harbour.clone();
            let catway_id = catway.id;
            tokio::spawn(async move {
                harbour
                    .reserve_use_case()
                    .execute(&caller(), stay(catway_id, (3, 1), (3, 5)))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(held);
        deletion.await.unwrap().unwrap();
        assert!(matches!(
            booking.await.unwrap(),
            Err(BookingError::CatwayNotFound)
        ));
        assert_eq!(harbour.store.reservation_count().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_disjoint_creates_all_succeed() {
        let harbour = Arc::new(Harbour::new(test_config()));
        let catway = harbour.catway(7).await;

        let handles: Vec<_> = (1..=8u32)
            .map(|month| {
                let harbour = harbour.clone();
                let catway_id = catway.id;
                tokio::spawn(async move {
                    harbour
                        .reserve_use_case()
                        .execute(&caller(), stay(catway_id, (month, 1), (month + 1, 1)))
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(harbour.store.reservation_count().await, 8);
    }
}

#[cfg(test)]
mod cancel_and_query_tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_requires_matching_catway() {
        let harbour = Harbour::new(test_config());
        let one = harbour.catway(1).await;
        harbour.catway(2).await;
        let reservation = harbour.reserve(&one, (3, 1), (3, 10)).await.unwrap();

        let wrong_catway = harbour
            .cancel_use_case()
            .execute(&caller(), CatwayNumber::new(2).unwrap(), &reservation.id)
            .await;
        assert!(matches!(wrong_catway, Err(BookingError::ReservationNotFound)));
        assert_eq!(harbour.store.reservation_count().await, 1);

        harbour
            .cancel_use_case()
            .execute(&caller(), one.catway_number, &reservation.id)
            .await
            .unwrap();
        assert_eq!(harbour.store.reservation_count().await, 0);

        let again = harbour
            .cancel_use_case()
            .execute(&caller(), one.catway_number, &reservation.id)
            .await;
        assert!(matches!(again, Err(BookingError::ReservationNotFound)));
    }

    #[tokio::test]
    async fn test_cancel_on_unknown_catways_leaves_no_lock_slots() {
        let harbour = Harbour::new(test_config());
        let cancel = harbour.cancel_use_case();

        for n in 1..=2_000 {
            let result = cancel
                .execute(&caller(), CatwayNumber::new(n).unwrap(), &ReservationId::new())
                .await;
            assert!(matches!(result, Err(BookingError::ReservationNotFound)));
        }
        assert_eq!(harbour.locks.active_slots(), 0);

        let catway = harbour.catway(1).await;
        let reservation = harbour.reserve(&catway, (3, 1), (3, 5)).await.unwrap();
        cancel
            .execute(&caller(), catway.catway_number, &reservation.id)
            .await
            .unwrap();
        assert_eq!(harbour.locks.active_slots(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_period_can_be_rebooked() {
        let harbour = Harbour::new(test_config());
        let catway = harbour.catway(1).await;
        let first = harbour.reserve(&catway, (3, 1), (3, 10)).await.unwrap();

        harbour
            .cancel_use_case()
            .execute(&caller(), catway.catway_number, &first.id)
            .await
            .unwrap();

        assert!(harbour.reserve(&catway, (3, 5), (3, 7)).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_reservation_scoped_to_catway() {
        let harbour = Harbour::new(test_config());
        let one = harbour.catway(1).await;
        let reservation = harbour.reserve(&one, (3, 1), (3, 10)).await.unwrap();
        let queries = harbour.queries();

        assert_eq!(
            queries.get(one.catway_number, &reservation.id).await.unwrap(),
            reservation
        );
        assert!(matches!(
            queries
                .get(CatwayNumber::new(99).unwrap(), &reservation.id)
                .await,
            Err(BookingError::ReservationNotFound)
        ));
        assert!(matches!(
            queries.get(one.catway_number, &ReservationId::new()).await,
            Err(BookingError::ReservationNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_for_catway_ordered_by_check_in() {
        let harbour = Harbour::new(test_config());
        let one = harbour.catway(1).await;
        let two = harbour.catway(2).await;
        harbour.reserve(&one, (5, 1), (5, 3)).await.unwrap();
        harbour.reserve(&one, (3, 1), (3, 3)).await.unwrap();
        harbour.reserve(&two, (4, 1), (4, 3)).await.unwrap();

        let listed = harbour.queries().list_for_catway(&one.id).await.unwrap();
        let check_ins: Vec<_> = listed.iter().map(|r| r.period.check_in()).collect();
        assert_eq!(check_ins, vec![day(3, 1), day(5, 1)]);

        assert_eq!(harbour.queries().list_all().await.unwrap().len(), 3);
        assert!(matches!(
            harbour.queries().list_for_catway(&CatwayId::new()).await,
            Err(BookingError::CatwayNotFound)
        ));
    }
}

#[cfg(test)]
mod availability_tests {
    use super::*;

    #[tokio::test]
    async fn test_without_window_excludes_any_reserved_catway() {
        let harbour = Harbour::new(test_config());
        let one = harbour.catway(1).await;
        harbour.catway(3).await;
        harbour.catway(2).await;

        assert_eq!(harbour.available_numbers(None).await, vec![1, 2, 3]);

        harbour.reserve(&one, (3, 1), (3, 10)).await.unwrap();
        assert_eq!(harbour.available_numbers(None).await, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_window_under_interval_policy() {
        let harbour = Harbour::new(test_config());
        let one = harbour.catway(1).await;
        harbour.catway(2).await;
        harbour.reserve(&one, (3, 1), (3, 10)).await.unwrap();

        let overlapping = StayPeriod::new(day(3, 5), day(3, 7)).unwrap();
        assert_eq!(harbour.available_numbers(Some(overlapping)).await, vec![2]);

        let touching = StayPeriod::new(day(3, 10), day(3, 12)).unwrap();
        assert_eq!(harbour.available_numbers(Some(touching)).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_window_under_whole_catway_policy() {
        let harbour = Harbour::new(config_with(
            AvailabilityPolicy::WholeCatway,
            CatwayDeletionPolicy::Retain,
        ));
        let one = harbour.catway(1).await;
        harbour.catway(2).await;
        harbour.reserve(&one, (3, 1), (3, 10)).await.unwrap();

        let later = StayPeriod::new(day(6, 1), day(6, 7)).unwrap();
        assert_eq!(harbour.available_numbers(Some(later)).await, vec![2]);
    }
}

#[cfg(test)]
mod catway_admin_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_validates_and_rejects_duplicates() {
        let harbour = Harbour::new(test_config());
        let catway = harbour.catway(100).await;
        assert_eq!(catway.catway_state.as_deref(), Some("good"));

        let create = |number: i32, catway_type: &str| CreateCatwayInput {
            catway_number: number,
            catway_type: catway_type.into(),
            catway_state: None,
        };

        assert!(matches!(
            harbour.admin().create(&caller(), create(100, "short")).await,
            Err(BookingError::AlreadyExists)
        ));
        assert!(matches!(
            harbour.admin().create(&caller(), create(0, "short")).await,
            Err(BookingError::InvalidInput(_))
        ));
        assert!(matches!(
            harbour.admin().create(&caller(), create(101, "medium")).await,
            Err(BookingError::InvalidInput(_))
        ));

        assert_eq!(harbour.admin().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let harbour = Harbour::new(test_config());
        let catway = harbour.catway(5).await;

        let updated = harbour
            .admin()
            .update(
                &caller(),
                &catway.id,
                CatwayUpdateInput {
                    catway_type: Some("".into()),
                    catway_state: Some("broken plank".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.catway_number.get(), 5);
        assert_eq!(updated.catway_type, catway.catway_type);
        assert_eq!(updated.catway_state.as_deref(), Some("broken plank"));
        assert_eq!(harbour.admin().get(&catway.id).await.unwrap(), updated);

        assert!(matches!(
            harbour
                .admin()
                .update(&caller(), &CatwayId::new(), CatwayUpdateInput::default())
                .await,
            Err(BookingError::CatwayNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_ordered_by_number() {
        let harbour = Harbour::new(test_config());
        for number in [30, 10, 20] {
            harbour.catway(number).await;
        }

        let numbers: Vec<i32> = harbour
            .admin()
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.catway_number.get())
            .collect();
        assert_eq!(numbers, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_delete_retain_keeps_reservations() {
        let harbour = Harbour::new(test_config());
        let catway = harbour.catway(1).await;
        harbour.reserve(&catway, (3, 1), (3, 10)).await.unwrap();

        harbour.admin().delete(&caller(), &catway.id).await.unwrap();

        assert!(matches!(
            harbour.admin().get(&catway.id).await,
            Err(BookingError::CatwayNotFound)
        ));
        assert_eq!(harbour.store.reservation_count().await, 1);
        // No new bookings against the deleted berth
        assert!(matches!(
            harbour.reserve(&catway, (4, 1), (4, 2)).await,
            Err(BookingError::CatwayNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_block_refuses_while_reserved() {
        let harbour = Harbour::new(config_with(
            AvailabilityPolicy::IntervalOverlap,
            CatwayDeletionPolicy::Block,
        ));
        let catway = harbour.catway(1).await;
        let reservation = harbour.reserve(&catway, (3, 1), (3, 10)).await.unwrap();

        assert!(matches!(
            harbour.admin().delete(&caller(), &catway.id).await,
            Err(BookingError::Conflict(_))
        ));

        harbour
            .cancel_use_case()
            .execute(&caller(), catway.catway_number, &reservation.id)
            .await
            .unwrap();
        assert!(harbour.admin().delete(&caller(), &catway.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_cascade_removes_reservations() {
        let harbour = Harbour::new(config_with(
            AvailabilityPolicy::IntervalOverlap,
            CatwayDeletionPolicy::Cascade,
        ));
        let one = harbour.catway(1).await;
        let two = harbour.catway(2).await;
        harbour.reserve(&one, (3, 1), (3, 10)).await.unwrap();
        harbour.reserve(&one, (4, 1), (4, 10)).await.unwrap();
        harbour.reserve(&two, (3, 1), (3, 10)).await.unwrap();

        harbour.admin().delete(&caller(), &one.id).await.unwrap();

        let remaining = harbour.queries().list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].catway_number, two.catway_number);
    }

    #[tokio::test]
    async fn test_delete_unknown_catway() {
        let harbour = Harbour::new(test_config());
        assert!(matches!(
            harbour.admin().delete(&caller(), &CatwayId::new()).await,
            Err(BookingError::CatwayNotFound)
        ));
    }
}

// ============================================================================
// Storage deadline
// ============================================================================

/// Repository whose every call stalls far beyond any configured timeout
#[derive(Clone, Default)]
struct StalledRepository;

impl StalledRepository {
    async fn stall<T>() -> BookingResult<T> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(BookingError::Internal("unreachable".into()))
    }
}

impl CatwayRepository for StalledRepository {
    async fn find_by_id(&self, _id: &CatwayId) -> BookingResult<Option<Catway>> {
        Self::stall().await
    }

    async fn find_by_number(&self, _number: CatwayNumber) -> BookingResult<Option<Catway>> {
        Self::stall().await
    }

    async fn list_excluding_numbers(&self, _numbers: &[CatwayNumber]) -> BookingResult<Vec<Catway>> {
        Self::stall().await
    }

    async fn list_all(&self) -> BookingResult<Vec<Catway>> {
        Self::stall().await
    }

    async fn create(&self, _catway: NewCatway) -> BookingResult<Catway> {
        Self::stall().await
    }

    async fn update(&self, _catway: &Catway) -> BookingResult<bool> {
        Self::stall().await
    }

    async fn delete_by_id(&self, _id: &CatwayId) -> BookingResult<bool> {
        Self::stall().await
    }
}

impl ReservationRepository for StalledRepository {
    async fn find(&self, _filter: &ReservationFilter) -> BookingResult<Vec<Reservation>> {
        Self::stall().await
    }

    async fn find_one(&self, _filter: &ReservationFilter) -> BookingResult<Option<Reservation>> {
        Self::stall().await
    }

    async fn create(&self, _reservation: NewReservation) -> BookingResult<Reservation> {
        Self::stall().await
    }

    async fn delete_by_id(&self, _id: &ReservationId) -> BookingResult<bool> {
        Self::stall().await
    }

    async fn delete_by_catway(&self, _number: CatwayNumber) -> BookingResult<u64> {
        Self::stall().await
    }

    async fn distinct_numbers(&self, _filter: &ReservationFilter) -> BookingResult<Vec<CatwayNumber>> {
        Self::stall().await
    }
}

#[cfg(test)]
mod deadline_tests {
    use super::*;

    fn fast_timeout() -> Arc<BookingConfig> {
        Arc::new(BookingConfig {
            storage_timeout: Duration::from_millis(50),
            ..BookingConfig::default()
        })
    }

    #[tokio::test]
    async fn test_stalled_repository_times_out() {
        let repo = Arc::new(StalledRepository);
        let config = fast_timeout();

        let result = ReserveUseCase::new(repo.clone(), Arc::new(CatwayLocks::new()), config.clone())
            .execute(&caller(), stay(CatwayId::new(), (3, 1), (3, 2)))
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, BookingError::Timeout(_)));
        assert!(err.is_retryable());
        assert_eq!(err.to_app_error().status_code(), 504);

        let result = AvailabilityUseCase::new(repo, config)
            .list_available(None)
            .await;
        assert!(matches!(result, Err(BookingError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_lock_wait_is_bounded() {
        let harbour = Harbour::new(Arc::new(BookingConfig {
            storage_timeout: Duration::from_millis(50),
            ..BookingConfig::default()
        }));
        let catway = harbour.catway(1).await;

        let _held = harbour
            .locks
            .acquire(catway.catway_number, Duration::from_secs(1))
            .await
            .unwrap();

        let result = harbour.reserve(&catway, (3, 1), (3, 2)).await;
        assert!(matches!(result, Err(BookingError::Timeout(_))));
        assert_eq!(harbour.store.reservation_count().await, 0);
    }

    #[test]
    fn test_filter_matching() {
        let period = StayPeriod::new(day(3, 1), day(3, 10)).unwrap();
        let reservation = NewReservation {
            catway_number: CatwayNumber::new(1).unwrap(),
            client_name: "a".into(),
            boat_name: "b".into(),
            period,
        }
        .into_reservation();

        assert!(ReservationFilter::default().matches(&reservation));
        assert!(ReservationFilter::on_catway(CatwayNumber::new(1).unwrap()).matches(&reservation));
        assert!(!ReservationFilter::on_catway(CatwayNumber::new(2).unwrap()).matches(&reservation));
        assert!(
            !ReservationFilter {
                overlapping: Some(StayPeriod::new(day(3, 10), day(3, 11)).unwrap()),
                ..Default::default()
            }
            .matches(&reservation)
        );
    }
}

// ============================================================================
// HTTP surface
// ============================================================================

#[cfg(test)]
mod http_tests {
    use super::*;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use axum::middleware::{self, Next};
    use axum::response::{IntoResponse, Response};
    use tower::ServiceExt;

    use crate::presentation::router::booking_router_generic;
    use crate::presentation::state::BookingState;

    type TestState = BookingState<InMemoryBookingStore>;

    async fn admit(mut req: Request<Body>, next: Next) -> Response {
        req.extensions_mut().insert(caller());
        next.run(req).await
    }

    async fn refuse(_req: Request<Body>, _next: Next) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }

    fn state() -> TestState {
        BookingState::new(InMemoryBookingStore::new(), (*test_config()).clone())
    }

    fn open_app() -> Router {
        booking_router_generic(state(), |router: Router<TestState>| {
            router.route_layer(middleware::from_fn(admit))
        })
    }

    fn closed_app() -> Router {
        booking_router_generic(state(), |router: Router<TestState>| {
            router.route_layer(middleware::from_fn(refuse))
        })
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_booking_over_http() {
        let app = open_app();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/catways",
                serde_json::json!({"catwayNumber": 100, "catwayType": "long"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let catway_id = body_json(response).await["id"].as_str().unwrap().to_string();

        let reserve = |from: &str, to: &str| {
            json_request(
                Method::POST,
                &format!("/catways/{catway_id}/reservations"),
                serde_json::json!({
                    "clientName": "Riguidel",
                    "boatName": "Gitana",
                    "checkIn": from,
                    "checkOut": to,
                }),
            )
        };

        let response = app
            .clone()
            .oneshot(reserve("2025-04-01", "2025-04-05"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["catwayNumber"], 100);
        assert_eq!(body["checkIn"], "2025-04-01T00:00:00Z");
        let reservation_id = body["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(reserve("2025-04-03T12:00:00Z", "2025-04-07"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let problem = body_json(response).await;
        assert_eq!(problem["status"], 409);
        assert!(problem["action"].is_string());

        let response = app
            .clone()
            .oneshot(get(&format!("/catways/100/reservations/{reservation_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get("/catways/available?from=2025-04-05&to=2025-04-06"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/catways/100/reservations/{reservation_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_bad_path_and_query_values() {
        let app = open_app();

        let response = app.clone().oneshot(get("/catways/not-a-uuid")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(get(&format!("/catways/0/reservations/{}", ReservationId::new())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(get("/catways/available?from=2025-04-05"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mutations_go_through_guard_reads_do_not() {
        let app = closed_app();

        let response = app.clone().oneshot(get("/catways")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let response = app.clone().oneshot(get("/reservations")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/catways",
                serde_json::json!({"catwayNumber": 1, "catwayType": "short"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/catways/{}", CatwayId::new()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
