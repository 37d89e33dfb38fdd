pub mod errors;
pub mod events;
pub mod exercise;
pub mod logging;
pub mod plot;
