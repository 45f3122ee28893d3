#[cfg(test)]
pub mod test_db {
    use crate::config::run_migrations;
    use crate::db::create_user;
    use crate::error::AppError;
    use crate::seed::seed_database;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::{Pool, Sqlite};
    use std::collections::HashMap;
    use std::sync::Once;

    static INIT: Once = Once::new();
    pub static STANDARD_PASSWORD: &str = "password123";

    #[derive(Default)]
    pub struct TestDbBuilder {
        users: Vec<TestUser>,
        seeded: bool,
    }

    pub struct TestUser {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn user(mut self, username: &str) -> Self {
            self.users.push(TestUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password: STANDARD_PASSWORD.to_string(),
            });
            self
        }

        pub fn user_with_password(mut self, username: &str, email: &str, password: &str) -> Self {
            self.users.push(TestUser {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            });
            self
        }

        /// Loads the resource and job-skill catalog, as `init-db` does.
        pub fn seeded(mut self) -> Self {
            self.seeded = true;
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = env_logger::builder()
                    .parse_filters("debug")
                    .is_test(true)
                    .try_init();
            });

            // A single connection keeps the in-memory database alive and shared.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await?;

            run_migrations(&pool).await?;

            if self.seeded {
                seed_database(&pool).await?;
            }

            let mut user_id_map: HashMap<String, i64> = HashMap::new();

            for user in &self.users {
                let user_id = create_user(&pool, &user.username, &user.email, &user.password).await?;
                user_id_map.insert(user.username.clone(), user_id);
            }

            Ok(TestDb { pool, user_id_map })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub user_id_map: HashMap<String, i64>,
    }

    impl TestDb {
        pub fn user_id(&self, username: &str) -> Option<i64> {
            self.user_id_map.get(username).copied()
        }

        pub async fn count(&self, table: &str) -> i64 {
            let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&self.pool)
                .await
                .expect("Failed to count rows");
            count
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::{Client, LocalResponse};

    use crate::catalog::select_catalog;
    use crate::init_rocket;

    pub use super::test_db::{STANDARD_PASSWORD, TestDb, TestDbBuilder};

    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .user("ada")
            .user("grace")
            .seeded()
            .build()
            .await
            .expect("Failed to build test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let catalog = select_catalog(&test_db.pool)
            .await
            .expect("Failed to select catalog");

        let rocket = init_rocket(test_db.pool.clone(), catalog);
        let client = Client::tracked(rocket)
            .await
            .expect("valid rocket instance");

        (client, test_db)
    }

    pub async fn post_form<'c>(client: &'c Client, uri: &'c str, body: &str) -> LocalResponse<'c> {
        client
            .post(uri)
            .header(ContentType::Form)
            .body(body.to_string())
            .dispatch()
            .await
    }

    pub async fn login_test_user(client: &Client, username: &str, password: &str) {
        let response = post_form(
            client,
            "/login",
            &format!("username={}&password={}", username, password),
        )
        .await;

        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(response.headers().get_one("Location"), Some("/dashboard"));
    }

    pub fn location<'a>(response: &'a LocalResponse<'_>) -> Option<&'a str> {
        response.headers().get_one("Location")
    }
}
