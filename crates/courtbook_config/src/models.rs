// --- File: crates/courtbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Court Booking Config ---
// Endpoint of the club's reservation API plus the slot schedule the
// calculator runs on. Schedule fields are optional; missing or
// malformed values fall back to the club defaults (75 minute slots,
// first start 08:30, latest end 22:15).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    pub api_base_url: String, // e.g. https://api.club.example/v1
    pub court_id: String,     // default court when a request names none
    pub time_zone: Option<String>, // IANA name, e.g. "Europe/Zurich"
    pub slot_duration_minutes: Option<u16>,
    pub first_slot: Option<String>,    // "HH:MM" club-local wall time
    pub last_slot_end: Option<String>, // "HH:MM" club-local wall time
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_booking: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub booking: Option<BookingConfig>,
}
