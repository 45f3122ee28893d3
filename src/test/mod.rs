mod db;
mod routes;
pub mod utils;
