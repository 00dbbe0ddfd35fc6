pub mod backend_client;
pub mod configuration;
pub mod constants;
pub mod coordinator;
pub mod domain;
pub mod events;
pub mod notifications;
pub mod startup;
pub mod telemetry;
pub mod ui;
