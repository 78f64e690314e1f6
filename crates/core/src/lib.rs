pub mod calendar;
pub mod context;
pub mod storage;
