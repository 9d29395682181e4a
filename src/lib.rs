#[macro_use]
extern crate diesel;

use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;

pub mod actions;
pub mod api;
pub mod display;
pub mod error;
pub mod models;
pub mod paginate;
pub mod quiz;
#[rustfmt::skip]
pub mod schema;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
