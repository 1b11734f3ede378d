mod client;
pub mod models;
mod time;

pub use client::{build_query, titles_by_date, titles_on, CalendarClient};
pub use models::{CalendarEvent, TitleFilter};
