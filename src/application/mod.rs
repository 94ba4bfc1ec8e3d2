// Application layer - Use cases and state slots
pub mod dashboard_service;
pub mod history_service;
pub mod market_state;
pub mod poll_scheduler;
pub mod price_repository;
pub mod quote_service;
