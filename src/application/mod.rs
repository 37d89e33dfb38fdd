pub mod session;
pub mod use_cases;

pub use session::*;
pub use use_cases::*;
