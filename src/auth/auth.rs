use rocket::State;
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::response::{Flash, Redirect};
use rocket_dyn_templates::{Template, context};
use sqlx::{Pool, Sqlite};
use tracing::{info, warn};

use crate::db;
use crate::validation::{Credentials, Registration};

use super::{SessionUser, Visitor, end_session, start_session};

#[derive(FromForm)]
pub struct LoginForm {
    username: Option<String>,
    password: Option<String>,
}

#[derive(FromForm)]
pub struct RegisterForm {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
}

fn field(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

#[get("/login")]
pub fn login(visitor: Visitor) -> Template {
    Template::render(
        "login",
        context! {
            title: "Login",
            visitor: visitor,
        },
    )
}

#[post("/login", data = "<form>")]
pub async fn process_login(
    form: Form<LoginForm>,
    cookies: &CookieJar<'_>,
    db: &State<Pool<Sqlite>>,
) -> Result<Flash<Redirect>, Flash<Redirect>> {
    let credentials = Credentials {
        username: field(&form.username),
        // Passwords are compared verbatim.
        password: form.password.clone().unwrap_or_default(),
    };

    info!("Login attempt: {}", &credentials.username);

    let fail = |message: String| Flash::new(Redirect::to("/login"), "danger", message);

    credentials.check().map_err(|e| fail(e.user_message()))?;

    match db::authenticate_user(db, &credentials.username, &credentials.password).await {
        Ok(user) => {
            info!("Authentication successful for {}", &user.username);
            start_session(cookies, &SessionUser::from(&user));
            Ok(Flash::new(
                Redirect::to("/dashboard"),
                "success",
                "Login successful!",
            ))
        }
        Err(e) => {
            e.log_and_record("Login");
            Err(fail(e.user_message()))
        }
    }
}

#[get("/logout")]
pub fn logout(cookies: &CookieJar<'_>) -> Flash<Redirect> {
    end_session(cookies);
    Flash::new(Redirect::to("/"), "info", "You have been logged out")
}

#[get("/register")]
pub fn register(visitor: Visitor) -> Template {
    Template::render(
        "register",
        context! {
            title: "Register",
            visitor: visitor,
        },
    )
}

#[post("/register", data = "<form>")]
pub async fn process_register(
    form: Form<RegisterForm>,
    db: &State<Pool<Sqlite>>,
) -> Result<Flash<Redirect>, Flash<Redirect>> {
    let registration = Registration {
        username: field(&form.username),
        email: field(&form.email),
        password: form.password.clone().unwrap_or_default(),
        confirm_password: form.confirm_password.clone().unwrap_or_default(),
    };

    let fail = |message: String| Flash::new(Redirect::to("/register"), "danger", message);

    if let Err(e) = registration.check() {
        warn!(username = %registration.username, "Registration rejected");
        return Err(fail(e.user_message()));
    }

    match db::create_user(
        db,
        &registration.username,
        &registration.email,
        &registration.password,
    )
    .await
    {
        Ok(user_id) => {
            info!(user_id, "Registered new user");
            Ok(Flash::new(
                Redirect::to("/login"),
                "success",
                "Registration successful! You can now log in.",
            ))
        }
        Err(e) => {
            e.log_and_record("Registration");
            Err(fail(e.user_message()))
        }
    }
}
