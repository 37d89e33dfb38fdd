pub mod http;
pub mod rendering;
pub mod services;

pub use http::ExerciseApiClient;
pub use rendering::CanvasRenderer;
pub use services::{BrowserTimeProvider, ConsoleLogger};
