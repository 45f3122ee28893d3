#[macro_use]
extern crate rocket;

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod telemetry;
pub mod validation;
#[cfg(test)]
mod test;

use auth::{
    login, logout, process_login, process_register, register, unauthorized,
};
use catalog::Catalog;
use error::AppError;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;
use routes::{
    advanced_python, dashboard, data_analysis, error_handling, exercises, health, index,
    job_skills, learning_path, lesson, object_oriented, projects, python_basics, record_note,
    record_progress, record_project, resources, technical_interviews, web_development,
};
use telemetry::TelemetryFairing;
use thiserror::Error;

use sqlx::SqlitePool;
use tracing::info;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Rocket(Box<rocket::Error>),
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

impl From<rocket::Error> for Error {
    fn from(value: rocket::Error) -> Self {
        Error::Rocket(Box::new(value))
    }
}

pub fn init_rocket(pool: SqlitePool, catalog: Catalog) -> Rocket<Build> {
    info!("Starting learning path server");

    rocket::build()
        .manage(pool)
        .manage(catalog)
        .mount(
            "/",
            routes![
                index,
                learning_path,
                lesson,
                python_basics,
                object_oriented,
                error_handling,
                advanced_python,
                data_analysis,
                web_development,
                technical_interviews,
                projects,
                exercises,
                resources,
                job_skills,
                dashboard,
                record_progress,
                record_project,
                record_note,
                login,
                process_login,
                logout,
                register,
                process_register,
                health,
            ],
        )
        .register("/", catchers![unauthorized])
        .attach(Template::fairing())
        .attach(TelemetryFairing)
}
