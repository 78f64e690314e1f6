pub mod calendars;
pub mod context;
pub mod error;
pub mod health;

pub use error::AppError;
