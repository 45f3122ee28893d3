#[cfg(test)]
mod tests {
    use rocket::http::Status;
    use serde_json::Value;

    use crate::auth::{LOGIN_REQUIRED, USER_ID_COOKIE};
    use crate::db::{delete_user, get_user_progress, get_user_projects};
    use crate::test::utils::test_utils::{
        STANDARD_PASSWORD, create_standard_test_db, location, login_test_user, post_form,
        setup_test_client,
    };

    const PUBLIC_PAGES: &[&str] = &[
        "/",
        "/learning_path",
        "/lesson",
        "/python_basics",
        "/object_oriented",
        "/error_handling",
        "/advanced_python",
        "/data_analysis",
        "/web_development",
        "/technical_interviews",
        "/projects",
        "/exercises",
        "/resources",
        "/job_skills",
        "/login",
        "/register",
    ];

    #[rocket::async_test]
    async fn test_public_pages_render() {
        let test_db = create_standard_test_db().await;
        let (client, _test_db) = setup_test_client(test_db).await;

        for page in PUBLIC_PAGES {
            let response = client.get(*page).dispatch().await;
            assert_eq!(response.status(), Status::Ok, "GET {}", page);
        }
    }

    #[rocket::async_test]
    async fn test_health() {
        let test_db = create_standard_test_db().await;
        let (client, _test_db) = setup_test_client(test_db).await;

        let response = client.get("/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.expect("health json");
        assert_eq!(body["status"], "OK");
        assert_eq!(body["catalog"], "database");
    }

    #[rocket::async_test]
    async fn test_dashboard_requires_login() {
        let test_db = create_standard_test_db().await;
        let (client, _test_db) = setup_test_client(test_db).await;

        let response = client.get("/dashboard").dispatch().await;
        assert_eq!(location(&response), Some("/login"));

        let body = client
            .get("/login")
            .dispatch()
            .await
            .into_string()
            .await
            .expect("login page body");
        assert!(body.contains(LOGIN_REQUIRED));
    }

    #[rocket::async_test]
    async fn test_dashboard_shows_user() {
        let test_db = create_standard_test_db().await;
        let (client, _test_db) = setup_test_client(test_db).await;

        login_test_user(&client, "grace", STANDARD_PASSWORD).await;

        let response = client.get("/dashboard").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().await.expect("dashboard body");
        assert!(body.contains("Welcome back, grace"));
        assert!(body.contains("Login successful!"));
    }

    #[rocket::async_test]
    async fn test_dashboard_drops_session_of_deleted_user() {
        let test_db = create_standard_test_db().await;
        let (client, test_db) = setup_test_client(test_db).await;

        login_test_user(&client, "grace", STANDARD_PASSWORD).await;
        let grace = test_db.user_id("grace").expect("grace exists");
        delete_user(&test_db.pool, grace).await.expect("delete grace");

        let response = client.get("/dashboard").dispatch().await;
        assert_eq!(location(&response), Some("/login"));

        // The session was cleared, so the guard now rejects the request.
        let again = client.get("/dashboard").dispatch().await;
        assert_eq!(location(&again), Some("/login"));
    }

    #[rocket::async_test]
    async fn test_writes_for_deleted_user_end_session() {
        let writes: &[(&str, &str)] = &[
            ("/progress", "path_id=beginner&topic_id=python_basics"),
            ("/projects/beginner-1/complete", "github_url="),
            ("/notes", "content_type=exercise&content_id=fizzbuzz&notes=modulo"),
        ];

        for (uri, body) in writes {
            let test_db = create_standard_test_db().await;
            let (client, test_db) = setup_test_client(test_db).await;

            login_test_user(&client, "grace", STANDARD_PASSWORD).await;
            let grace = test_db.user_id("grace").expect("grace exists");
            delete_user(&test_db.pool, grace).await.expect("delete grace");

            let response = post_form(&client, uri, body).await;
            assert_eq!(location(&response), Some("/login"), "POST {}", uri);
            assert!(client.cookies().get_private(USER_ID_COOKIE).is_none());

            let login_page = client
                .get("/login")
                .dispatch()
                .await
                .into_string()
                .await
                .expect("login page body");
            assert!(login_page.contains(LOGIN_REQUIRED));
        }
    }

    #[rocket::async_test]
    async fn test_completed_topic_appears_on_dashboard() {
        let test_db = create_standard_test_db().await;
        let (client, test_db) = setup_test_client(test_db).await;

        login_test_user(&client, "ada", STANDARD_PASSWORD).await;

        let before = client
            .get("/dashboard")
            .dispatch()
            .await
            .into_string()
            .await
            .expect("dashboard body");
        assert!(!before.contains("Python Basics"));

        let response = post_form(
            &client,
            "/progress",
            "path_id=beginner&topic_id=python_basics",
        )
        .await;
        assert_eq!(location(&response), Some("/learning_path"));

        // Marking the same topic twice keeps a single row.
        post_form(
            &client,
            "/progress",
            "path_id=beginner&topic_id=python_basics",
        )
        .await;

        let ada = test_db.user_id("ada").expect("ada exists");
        let progress = get_user_progress(&test_db.pool, ada)
            .await
            .expect("load progress");
        assert_eq!(progress.len(), 1);
        assert!(progress[0].completed);

        let after = client
            .get("/dashboard")
            .dispatch()
            .await
            .into_string()
            .await
            .expect("dashboard body");
        assert!(after.contains("Python Basics"));
    }

    #[rocket::async_test]
    async fn test_unknown_topic_is_not_recorded() {
        let test_db = create_standard_test_db().await;
        let (client, test_db) = setup_test_client(test_db).await;

        login_test_user(&client, "ada", STANDARD_PASSWORD).await;
        post_form(&client, "/progress", "path_id=beginner&topic_id=cobol").await;

        assert_eq!(test_db.count("user_progress").await, 0);
    }

    #[rocket::async_test]
    async fn test_progress_requires_login() {
        let test_db = create_standard_test_db().await;
        let (client, test_db) = setup_test_client(test_db).await;

        let response = post_form(
            &client,
            "/progress",
            "path_id=beginner&topic_id=python_basics",
        )
        .await;
        assert_eq!(location(&response), Some("/login"));
        assert_eq!(test_db.count("user_progress").await, 0);
    }

    #[rocket::async_test]
    async fn test_completed_project_appears_on_dashboard() {
        let test_db = create_standard_test_db().await;
        let (client, test_db) = setup_test_client(test_db).await;

        login_test_user(&client, "ada", STANDARD_PASSWORD).await;

        let response = post_form(
            &client,
            "/projects/beginner-1/complete",
            "github_url=https%3A%2F%2Fgithub.com%2Fada%2Ftodo",
        )
        .await;
        assert_eq!(location(&response), Some("/projects"));

        let ada = test_db.user_id("ada").expect("ada exists");
        let projects = get_user_projects(&test_db.pool, ada)
            .await
            .expect("load projects");
        assert_eq!(projects.len(), 1);
        assert_eq!(
            projects[0].github_url.as_deref(),
            Some("https://github.com/ada/todo")
        );

        let body = client
            .get("/dashboard")
            .dispatch()
            .await
            .into_string()
            .await
            .expect("dashboard body");
        assert!(body.contains("Command Line To-Do List Application"));
    }

    #[rocket::async_test]
    async fn test_note_saved_from_dashboard() {
        let test_db = create_standard_test_db().await;
        let (client, test_db) = setup_test_client(test_db).await;

        login_test_user(&client, "ada", STANDARD_PASSWORD).await;

        post_form(
            &client,
            "/notes",
            "content_type=lesson&content_id=python_basics&notes=Revisit+list+slicing",
        )
        .await;
        post_form(
            &client,
            "/notes",
            "content_type=lesson&content_id=python_basics&notes=Slicing+makes+sense+now",
        )
        .await;

        assert_eq!(test_db.count("user_notes").await, 1);

        let body = client
            .get("/dashboard")
            .dispatch()
            .await
            .into_string()
            .await
            .expect("dashboard body");
        assert!(body.contains("Slicing makes sense now"));
        assert!(!body.contains("Revisit list slicing"));
    }

    #[rocket::async_test]
    async fn test_empty_note_rejected() {
        let test_db = create_standard_test_db().await;
        let (client, test_db) = setup_test_client(test_db).await;

        login_test_user(&client, "ada", STANDARD_PASSWORD).await;
        post_form(
            &client,
            "/notes",
            "content_type=project&content_id=beginner-1&notes=+++",
        )
        .await;

        assert_eq!(test_db.count("user_notes").await, 0);
    }

    #[rocket::async_test]
    async fn test_resources_grouped_on_page() {
        let test_db = create_standard_test_db().await;
        let (client, _test_db) = setup_test_client(test_db).await;

        let body = client
            .get("/resources")
            .dispatch()
            .await
            .into_string()
            .await
            .expect("resources body");
        assert!(body.contains("Real Python"));
        assert!(body.contains("Practice Sites"));
    }
}
