use rocket::Request;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::request::{FlashMessage, FromRequest, Outcome};
use rocket::response::{Flash, Redirect};
use serde::Serialize;

use super::SessionUser;

pub const USER_ID_COOKIE: &str = "user_id";
pub const USERNAME_COOKIE: &str = "username";

pub const LOGIN_REQUIRED: &str = "Please log in to access your dashboard";

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_span = tracing::info_span!("session_guard");
        let _guard = auth_span.enter();

        match read_session(request.cookies()) {
            Some(user) => {
                tracing::debug!(username = %user.username, "Session found");
                Outcome::Success(user)
            }
            None => Outcome::Forward(Status::Unauthorized),
        }
    }
}

fn read_session(cookies: &CookieJar<'_>) -> Option<SessionUser> {
    let id = cookies
        .get_private(USER_ID_COOKIE)
        .and_then(|c| c.value().parse::<i64>().ok())?;

    let username = cookies
        .get_private(USERNAME_COOKIE)
        .map(|c| c.value().to_string())?;

    Some(SessionUser { id, username })
}

pub fn start_session(cookies: &CookieJar<'_>, user: &SessionUser) {
    cookies.add_private(
        Cookie::build((USER_ID_COOKIE, user.id.to_string()))
            .same_site(SameSite::Lax)
            .http_only(true),
    );
    cookies.add_private(
        Cookie::build((USERNAME_COOKIE, user.username.clone()))
            .same_site(SameSite::Lax)
            .http_only(true),
    );
}

pub fn end_session(cookies: &CookieJar<'_>) {
    cookies.remove_private(Cookie::build(USER_ID_COOKIE));
    cookies.remove_private(Cookie::build(USERNAME_COOKIE));
}

/// A one-shot notice carried over from the previous response.
#[derive(Debug, Serialize, Clone)]
pub struct Notice {
    pub kind: String,
    pub message: String,
}

/// Per-request page context shared by every rendered view.
#[derive(Debug, Serialize, Clone)]
pub struct Visitor {
    pub user: Option<SessionUser>,
    pub notice: Option<Notice>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Visitor {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user = read_session(request.cookies());

        let notice = request
            .guard::<Option<FlashMessage<'_>>>()
            .await
            .succeeded()
            .flatten()
            .map(|flash| Notice {
                kind: flash.kind().to_string(),
                message: flash.message().to_string(),
            });

        Outcome::Success(Visitor { user, notice })
    }
}

#[catch(401)]
pub fn unauthorized(req: &Request) -> Flash<Redirect> {
    tracing::warn!(uri = %req.uri(), "Unauthorized access attempt");
    Flash::new(Redirect::to("/login"), "warning", LOGIN_REQUIRED)
}
