// --- File: crates/courtbook_booking/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;
pub mod slots;
#[cfg(test)]
mod slots_proptest;
