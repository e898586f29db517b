//! In-process authoritative store. Every aggregate lives behind its own
//! repository; nothing outside a repository touches the tables directly.

pub mod ids;
pub mod models;
pub mod repositories;
