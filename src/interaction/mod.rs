/// Pointer state machine and coordinate mapping.
pub mod controller;
