use rocket::State;
use rocket::form::Form;
use rocket::http::{CookieJar, Status};
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket_dyn_templates::{Template, context};
use serde::Serialize;
use serde_json::{Value, json};
use sqlx::{Pool, Sqlite};
use tracing::{error, info, warn};

use crate::auth::{LOGIN_REQUIRED, SessionUser, Visitor, end_session};
use crate::catalog::Catalog;
use crate::content::{
    self, EXERCISES, LEARNING_PATHS, NOTE_CONTENT_TYPES, PROJECTS, find_project, find_topic,
};
use crate::db::{
    complete_project, get_user, get_user_notes, get_user_progress, get_user_projects,
    mark_topic_complete, save_note,
};
use crate::error::AppError;
use crate::models::{UserNote, UserProgress, UserProject};
use crate::validation::NOTE_REQUIRED;

fn page(name: &'static str, title: &str, visitor: Visitor) -> Template {
    Template::render(
        name,
        context! {
            title: title,
            visitor: visitor,
        },
    )
}

#[get("/")]
pub fn index(visitor: Visitor) -> Template {
    page("index", "Python Learning Path", visitor)
}

#[get("/learning_path")]
pub fn learning_path(visitor: Visitor) -> Template {
    Template::render(
        "learning_path",
        context! {
            title: "Learning Path",
            visitor: visitor,
            paths: LEARNING_PATHS,
        },
    )
}

#[get("/lesson")]
pub fn lesson(visitor: Visitor) -> Template {
    page("lesson", "Lesson", visitor)
}

#[get("/python_basics")]
pub fn python_basics(visitor: Visitor) -> Template {
    page("python_basics", "Python Basics", visitor)
}

#[get("/object_oriented")]
pub fn object_oriented(visitor: Visitor) -> Template {
    page("object_oriented", "Object-Oriented Programming", visitor)
}

#[get("/error_handling")]
pub fn error_handling(visitor: Visitor) -> Template {
    page("error_handling", "Error Handling", visitor)
}

#[get("/advanced_python")]
pub fn advanced_python(visitor: Visitor) -> Template {
    page("advanced_python", "Advanced Python Features", visitor)
}

#[get("/data_analysis")]
pub fn data_analysis(visitor: Visitor) -> Template {
    page("data_analysis", "Data Analysis with Python", visitor)
}

#[get("/web_development")]
pub fn web_development(visitor: Visitor) -> Template {
    page("web_development", "Web Development Basics", visitor)
}

#[get("/technical_interviews")]
pub fn technical_interviews(visitor: Visitor) -> Template {
    page("technical_interviews", "Technical Interview Preparation", visitor)
}

#[get("/projects")]
pub fn projects(visitor: Visitor) -> Template {
    Template::render(
        "projects",
        context! {
            title: "Projects",
            visitor: visitor,
            projects: PROJECTS,
        },
    )
}

#[get("/exercises")]
pub fn exercises(visitor: Visitor) -> Template {
    Template::render(
        "exercises",
        context! {
            title: "Exercises",
            visitor: visitor,
            exercises: EXERCISES,
        },
    )
}

#[get("/resources")]
pub async fn resources(visitor: Visitor, catalog: &State<Catalog>) -> Result<Template, Status> {
    let groups = catalog.resources_by_category().await?;

    Ok(Template::render(
        "resources",
        context! {
            title: "Resources",
            visitor: visitor,
            source: catalog.name(),
            resources: groups,
        },
    ))
}

#[get("/job_skills")]
pub async fn job_skills(visitor: Visitor, catalog: &State<Catalog>) -> Result<Template, Status> {
    let groups = catalog.skills_by_category().await?;

    Ok(Template::render(
        "job_skills",
        context! {
            title: "Job Skills",
            visitor: visitor,
            source: catalog.name(),
            job_skills: groups,
        },
    ))
}

#[derive(Serialize)]
struct ProgressRow {
    path_id: String,
    topic_id: String,
    topic_title: String,
    completed: bool,
    completed_at: String,
}

impl From<UserProgress> for ProgressRow {
    fn from(progress: UserProgress) -> Self {
        let topic_title = find_topic(&progress.path_id, &progress.topic_id)
            .map(|topic| topic.title.to_string())
            .unwrap_or_else(|| progress.topic_id.clone());

        Self {
            topic_title,
            completed: progress.completed,
            completed_at: progress
                .completed_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            path_id: progress.path_id,
            topic_id: progress.topic_id,
        }
    }
}

#[derive(Serialize)]
struct ProjectRow {
    project_id: String,
    title: String,
    github_url: Option<String>,
    completed_at: String,
}

impl From<UserProject> for ProjectRow {
    fn from(project: UserProject) -> Self {
        let title = find_project(&project.project_id)
            .map(|p| p.title.to_string())
            .unwrap_or_else(|| project.project_id.clone());

        Self {
            title,
            github_url: project.github_url,
            completed_at: project
                .completed_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            project_id: project.project_id,
        }
    }
}

#[derive(Serialize)]
struct NoteRow {
    content_type: String,
    content_id: String,
    notes: String,
    updated_at: String,
}

impl From<UserNote> for NoteRow {
    fn from(note: UserNote) -> Self {
        Self {
            content_type: note.content_type,
            content_id: note.content_id,
            notes: note.notes,
            updated_at: note.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[get("/dashboard")]
pub async fn dashboard(
    session: SessionUser,
    visitor: Visitor,
    cookies: &CookieJar<'_>,
    db: &State<Pool<Sqlite>>,
) -> Result<Template, Flash<Redirect>> {
    let user = match get_user(db, session.id).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(session_expired(cookies, &session)),
        Err(e) => return Err(internal_failure("/", e, "Loading dashboard")),
    };

    let progress = get_user_progress(db, user.id)
        .await
        .map_err(|e| internal_failure("/", e, "Loading progress"))?;
    let completed_projects = get_user_projects(db, user.id)
        .await
        .map_err(|e| internal_failure("/", e, "Loading completed projects"))?;
    let notes = get_user_notes(db, user.id)
        .await
        .map_err(|e| internal_failure("/", e, "Loading notes"))?;

    Ok(Template::render(
        "dashboard",
        context! {
            title: "Dashboard",
            visitor: visitor,
            user: user,
            progress: progress.into_iter().map(ProgressRow::from).collect::<Vec<_>>(),
            completed_projects: completed_projects.into_iter().map(ProjectRow::from).collect::<Vec<_>>(),
            notes: notes.into_iter().map(NoteRow::from).collect::<Vec<_>>(),
            note_content_types: NOTE_CONTENT_TYPES,
        },
    ))
}

/// Ends a session whose user no longer exists and sends the visitor to log in.
fn session_expired(cookies: &CookieJar<'_>, session: &SessionUser) -> Flash<Redirect> {
    warn!(user_id = session.id, "Session refers to a missing user");
    end_session(cookies);
    Flash::new(Redirect::to("/login"), "warning", LOGIN_REQUIRED)
}

fn internal_failure(to: &'static str, e: AppError, ctx: &str) -> Flash<Redirect> {
    e.log_and_record(ctx);
    Flash::new(Redirect::to(to), "danger", e.user_message())
}

#[derive(FromForm)]
pub struct ProgressForm {
    path_id: String,
    topic_id: String,
}

#[post("/progress", data = "<form>")]
pub async fn record_progress(
    session: SessionUser,
    cookies: &CookieJar<'_>,
    form: Form<ProgressForm>,
    db: &State<Pool<Sqlite>>,
) -> Flash<Redirect> {
    let back = || Redirect::to("/learning_path");

    let Some(topic) = find_topic(&form.path_id, &form.topic_id) else {
        warn!(path_id = %form.path_id, topic_id = %form.topic_id, "Unknown topic");
        return Flash::new(back(), "danger", "Unknown topic");
    };

    match mark_topic_complete(db, session.id, &form.path_id, &form.topic_id).await {
        Ok(_) => {
            info!(user_id = session.id, topic = %topic.route, "Topic completed");
            Flash::new(
                back(),
                "success",
                format!("Marked \"{}\" as complete", topic.title),
            )
        }
        Err(AppError::NotFound(_)) => session_expired(cookies, &session),
        Err(e) => internal_failure("/learning_path", e, "Recording progress"),
    }
}

#[derive(FromForm)]
pub struct ProjectCompletionForm {
    github_url: Option<String>,
}

#[post("/projects/<project_id>/complete", data = "<form>")]
pub async fn record_project(
    project_id: &str,
    session: SessionUser,
    cookies: &CookieJar<'_>,
    form: Form<ProjectCompletionForm>,
    db: &State<Pool<Sqlite>>,
) -> Flash<Redirect> {
    let back = || Redirect::to("/projects");

    let Some(project) = find_project(project_id) else {
        warn!(project_id = %project_id, "Unknown project");
        return Flash::new(back(), "danger", "Unknown project");
    };

    let github_url = form
        .github_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    match complete_project(db, session.id, project.id, github_url).await {
        Ok(_) => Flash::new(
            back(),
            "success",
            format!("Project \"{}\" recorded as complete", project.title),
        ),
        Err(AppError::NotFound(_)) => session_expired(cookies, &session),
        Err(e) => internal_failure("/projects", e, "Recording project"),
    }
}

#[derive(FromForm)]
pub struct NoteForm {
    content_type: String,
    content_id: String,
    notes: Option<String>,
}

#[post("/notes", data = "<form>")]
pub async fn record_note(
    session: SessionUser,
    cookies: &CookieJar<'_>,
    form: Form<NoteForm>,
    db: &State<Pool<Sqlite>>,
) -> Flash<Redirect> {
    let back = || Redirect::to("/dashboard");

    if !content::content_exists(&form.content_type, &form.content_id) {
        return Flash::new(back(), "danger", "Unknown content for note");
    }

    let notes = form.notes.as_deref().unwrap_or_default().trim();
    if notes.is_empty() {
        return Flash::new(back(), "danger", NOTE_REQUIRED);
    }

    match save_note(db, session.id, &form.content_type, &form.content_id, notes).await {
        Ok(_) => Flash::new(back(), "success", "Note saved"),
        Err(AppError::NotFound(_)) => session_expired(cookies, &session),
        Err(e) => {
            error!(user_id = session.id, "Failed to save note");
            internal_failure("/dashboard", e, "Saving note")
        }
    }
}

#[get("/health")]
pub fn health(catalog: &State<Catalog>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "catalog": catalog.name(),
    }))
}
