//! Periodic background refresh.

mod controller;

pub use controller::PollingController;
