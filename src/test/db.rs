#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use crate::db::{
        authenticate_user, complete_project, create_user, delete_user, find_user_by_email,
        get_user, get_user_notes, get_user_progress, get_user_projects, mark_topic_complete,
        save_note,
    };
    use crate::error::AppError;
    use crate::test::utils::test_utils::{TestDbBuilder, create_standard_test_db};

    type Recorded = Arc<Mutex<Vec<(String, String, String)>>>;

    /// Collects (span, field, value) for every span opened while installed.
    struct SpanFields(Recorded);

    struct FieldVisitor<'a> {
        span: &'static str,
        out: &'a mut Vec<(String, String, String)>,
    }

    impl Visit for FieldVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.out.push((
                self.span.to_string(),
                field.name().to_string(),
                format!("{:?}", value),
            ));
        }
    }

    impl<S: Subscriber> Layer<S> for SpanFields {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            if let Ok(mut out) = self.0.lock() {
                attrs.record(&mut FieldVisitor {
                    span: attrs.metadata().name(),
                    out: &mut out,
                });
            }
        }
    }

    #[rocket::async_test]
    async fn test_passwords_are_hashed() {
        let test_db = TestDbBuilder::new()
            .user_with_password("ada", "ada@example.com", "plaintext")
            .build()
            .await
            .expect("build test db");

        let (hash,): (String,) =
            sqlx::query_as("SELECT password_hash FROM users WHERE username = 'ada'")
                .fetch_one(&test_db.pool)
                .await
                .expect("load hash");

        assert_ne!(hash, "plaintext");
        assert!(bcrypt::verify("plaintext", &hash).expect("verify hash"));
    }

    #[rocket::async_test]
    async fn test_create_user_rejects_duplicates() {
        let test_db = create_standard_test_db().await;

        let by_name = create_user(&test_db.pool, "ada", "other@example.com", "pw").await;
        assert!(matches!(by_name, Err(AppError::Validation(msg)) if msg == "Username already exists"));

        let by_email = create_user(&test_db.pool, "other", "ada@example.com", "pw").await;
        assert!(matches!(by_email, Err(AppError::Validation(msg)) if msg == "Email already registered"));

        assert!(
            find_user_by_email(&test_db.pool, "ada@example.com")
                .await
                .expect("lookup")
                .is_some()
        );
        assert_eq!(test_db.count("users").await, 2);
    }

    #[rocket::async_test]
    async fn test_delete_user_cascades() {
        let test_db = create_standard_test_db().await;
        let ada = test_db.user_id("ada").expect("ada exists");
        let grace = test_db.user_id("grace").expect("grace exists");

        mark_topic_complete(&test_db.pool, ada, "beginner", "python_basics")
            .await
            .expect("progress");
        complete_project(&test_db.pool, ada, "beginner-1", None)
            .await
            .expect("project");
        save_note(&test_db.pool, ada, "lesson", "python_basics", "loops")
            .await
            .expect("note");
        mark_topic_complete(&test_db.pool, grace, "beginner", "python_basics")
            .await
            .expect("progress");

        delete_user(&test_db.pool, ada).await.expect("delete ada");

        assert!(matches!(
            get_user(&test_db.pool, ada).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(test_db.count("user_progress").await, 1);
        assert_eq!(test_db.count("user_projects").await, 0);
        assert_eq!(test_db.count("user_notes").await, 0);

        assert!(matches!(
            delete_user(&test_db.pool, ada).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[rocket::async_test]
    async fn test_writes_for_missing_user_are_not_found() {
        let test_db = create_standard_test_db().await;
        let ghost = 9_999;

        assert!(matches!(
            mark_topic_complete(&test_db.pool, ghost, "beginner", "python_basics").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            complete_project(&test_db.pool, ghost, "beginner-1", None).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            save_note(&test_db.pool, ghost, "exercise", "fizzbuzz", "modulo").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[rocket::async_test]
    async fn test_user_spans_carry_username() {
        let test_db = create_standard_test_db().await;

        let fields = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(SpanFields(fields.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        create_user(&test_db.pool, "linus", "linus@example.com", "penguin")
            .await
            .expect("create linus");
        authenticate_user(&test_db.pool, "linus", "penguin")
            .await
            .expect("authenticate linus");

        let fields = fields.lock().expect("span fields");
        assert!(fields.contains(&(
            "create_user".to_string(),
            "username".to_string(),
            "linus".to_string()
        )));
        assert!(fields.contains(&(
            "create_user".to_string(),
            "email".to_string(),
            "linus@example.com".to_string()
        )));
        assert!(fields.contains(&(
            "authenticate_user".to_string(),
            "username".to_string(),
            "linus".to_string()
        )));
    }

    #[rocket::async_test]
    async fn test_progress_is_per_user_and_topic() {
        let test_db = create_standard_test_db().await;
        let ada = test_db.user_id("ada").expect("ada exists");

        let first = mark_topic_complete(&test_db.pool, ada, "beginner", "python_basics")
            .await
            .expect("progress");
        let second = mark_topic_complete(&test_db.pool, ada, "beginner", "python_basics")
            .await
            .expect("progress");
        mark_topic_complete(&test_db.pool, ada, "beginner", "object_oriented")
            .await
            .expect("progress");

        assert_eq!(first, second);

        let progress = get_user_progress(&test_db.pool, ada).await.expect("load");
        let topics: Vec<&str> = progress.iter().map(|p| p.topic_id.as_str()).collect();
        assert_eq!(topics, vec!["python_basics", "object_oriented"]);
        assert!(progress.iter().all(|p| p.completed && p.completed_at.is_some()));
    }

    #[rocket::async_test]
    async fn test_project_url_is_updated_not_duplicated() {
        let test_db = create_standard_test_db().await;
        let ada = test_db.user_id("ada").expect("ada exists");

        complete_project(&test_db.pool, ada, "beginner-2", None)
            .await
            .expect("project");
        complete_project(
            &test_db.pool,
            ada,
            "beginner-2",
            Some("https://github.com/ada/weather"),
        )
        .await
        .expect("project");
        complete_project(&test_db.pool, ada, "beginner-2", None)
            .await
            .expect("project");

        let projects = get_user_projects(&test_db.pool, ada).await.expect("load");
        assert_eq!(projects.len(), 1);
        assert_eq!(
            projects[0].github_url.as_deref(),
            Some("https://github.com/ada/weather")
        );
    }

    #[rocket::async_test]
    async fn test_save_note_upserts() {
        let test_db = create_standard_test_db().await;
        let ada = test_db.user_id("ada").expect("ada exists");

        let first = save_note(&test_db.pool, ada, "exercise", "fizzbuzz", "use modulo")
            .await
            .expect("note");
        let second = save_note(&test_db.pool, ada, "exercise", "fizzbuzz", "check 15 first")
            .await
            .expect("note");
        save_note(&test_db.pool, ada, "project", "beginner-1", "json storage")
            .await
            .expect("note");

        assert_eq!(first, second);

        let notes = get_user_notes(&test_db.pool, ada).await.expect("load");
        assert_eq!(notes.len(), 2);

        let fizzbuzz = notes
            .iter()
            .find(|note| note.content_id == "fizzbuzz")
            .expect("fizzbuzz note");
        assert_eq!(fizzbuzz.notes, "check 15 first");
        assert!(fizzbuzz.updated_at >= fizzbuzz.created_at);
    }
}
