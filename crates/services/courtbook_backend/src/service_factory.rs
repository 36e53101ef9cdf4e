// --- File: crates/services/courtbook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module provides an implementation of the ServiceFactory trait for
//! the backend service. The factory initializes the club reservation
//! client from the application configuration and hands it out as a trait
//! object, keeping the concrete HTTP client out of the binary's wiring.

use courtbook_booking::service::{BoxedReservationService, ClubApiService};
use courtbook_common::is_booking_enabled;
use courtbook_common::services::{BoxedError, ReservationService, ServiceFactory};
use courtbook_config::AppConfig;
use std::sync::Arc;
use tracing::info;

/// Service factory for the courtbook backend.
pub struct CourtbookServiceFactory {
    /// Kept for future services that need configuration access after
    /// construction.
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    reservation_service: Option<Arc<dyn ReservationService<Error = BoxedError>>>,
}

impl CourtbookServiceFactory {
    /// Create a new service factory from the loaded configuration.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let reservation_service = if is_booking_enabled(&config) {
            config.booking.as_ref().map(|booking_config| {
                info!("Initializing club reservation service...");
                Arc::new(BoxedReservationService::new(ClubApiService::new(
                    booking_config,
                ))) as Arc<dyn ReservationService<Error = BoxedError>>
            })
        } else {
            info!("Booking disabled via runtime config or missing booking section.");
            None
        };

        Self {
            config,
            reservation_service,
        }
    }
}

impl ServiceFactory for CourtbookServiceFactory {
    fn reservation_service(&self) -> Option<Arc<dyn ReservationService<Error = BoxedError>>> {
        self.reservation_service.clone()
    }
}
