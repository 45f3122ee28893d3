//! Fixed catalog data loaded by `init-db`. The same tables back the
//! in-memory catalog when the database has not been seeded.

use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::error::AppError;

pub struct SeedCategory {
    pub name: &'static str,
    pub description: &'static str,
}

pub struct SeedResource {
    pub title: &'static str,
    pub url: &'static str,
    pub description: &'static str,
    pub resource_type: &'static str,
    pub category: &'static str,
    pub is_free: bool,
}

pub struct SeedSkill {
    pub name: &'static str,
    pub category: &'static str,
    pub importance_level: i64,
    pub description: &'static str,
}

pub static RESOURCE_CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Tutorials",
        description: "Step-by-step guides for learning Python concepts and tools.",
    },
    SeedCategory {
        name: "Documentation",
        description: "Official documentation and reference materials.",
    },
    SeedCategory {
        name: "Online Courses",
        description: "Structured learning experiences for developing Python skills.",
    },
    SeedCategory {
        name: "Books",
        description: "In-depth resources for comprehensive learning.",
    },
    SeedCategory {
        name: "Community Resources",
        description: "Forums, blogs, and discussion boards for Python developers.",
    },
    SeedCategory {
        name: "Practice Sites",
        description: "Websites for practicing coding challenges and improving skills.",
    },
];

pub static RESOURCES: &[SeedResource] = &[
    SeedResource {
        title: "Python.org Official Documentation",
        url: "https://docs.python.org/3/",
        description: "The official Python documentation with tutorials, library references and more.",
        resource_type: "documentation",
        category: "Documentation",
        is_free: true,
    },
    SeedResource {
        title: "Real Python",
        url: "https://realpython.com/",
        description: "Tutorials, articles, and courses for all levels of Python developers.",
        resource_type: "tutorial",
        category: "Tutorials",
        is_free: true,
    },
    SeedResource {
        title: "Python Crash Course (Book)",
        url: "https://nostarch.com/pythoncrashcourse2e",
        description: "A hands-on, project-based introduction to Python programming.",
        resource_type: "book",
        category: "Books",
        is_free: false,
    },
    SeedResource {
        title: "Automate the Boring Stuff with Python",
        url: "https://automatetheboringstuff.com/",
        description: "Practical programming for total beginners, available both as a book and free online.",
        resource_type: "book",
        category: "Books",
        is_free: true,
    },
    SeedResource {
        title: "Codecademy Python Course",
        url: "https://www.codecademy.com/learn/learn-python-3",
        description: "Interactive Python course with hands-on exercises.",
        resource_type: "course",
        category: "Online Courses",
        is_free: false,
    },
    SeedResource {
        title: "LeetCode",
        url: "https://leetcode.com/",
        description: "Platform to practice coding problems often used in technical interviews.",
        resource_type: "practice",
        category: "Practice Sites",
        is_free: true,
    },
    SeedResource {
        title: "Flask Documentation",
        url: "https://flask.palletsprojects.com/",
        description: "Official documentation for the Flask web framework.",
        resource_type: "documentation",
        category: "Documentation",
        is_free: true,
    },
    SeedResource {
        title: "PythonAnywhere",
        url: "https://www.pythonanywhere.com/",
        description: "Hosting platform for Python web applications with free tier.",
        resource_type: "tool",
        category: "Community Resources",
        is_free: true,
    },
    SeedResource {
        title: "SQLAlchemy Documentation",
        url: "https://docs.sqlalchemy.org/",
        description: "Comprehensive documentation for the SQLAlchemy ORM.",
        resource_type: "documentation",
        category: "Documentation",
        is_free: true,
    },
    SeedResource {
        title: "Stack Overflow Python Tag",
        url: "https://stackoverflow.com/questions/tagged/python",
        description: "Community Q&A for Python programming problems.",
        resource_type: "community",
        category: "Community Resources",
        is_free: true,
    },
];

pub static JOB_SKILLS: &[SeedSkill] = &[
    SeedSkill {
        name: "Python Syntax",
        category: "Programming Fundamentals",
        importance_level: 5,
        description: "Core Python syntax including variables, data types, control flow, and functions.",
    },
    SeedSkill {
        name: "Object-Oriented Programming",
        category: "Programming Fundamentals",
        importance_level: 4,
        description: "Understanding classes, inheritance, encapsulation, and polymorphism in Python.",
    },
    SeedSkill {
        name: "Data Structures",
        category: "Programming Fundamentals",
        importance_level: 5,
        description: "Working with lists, dictionaries, sets, tuples and understanding their performance characteristics.",
    },
    SeedSkill {
        name: "Algorithms",
        category: "Programming Fundamentals",
        importance_level: 4,
        description: "Implementing and analyzing common algorithms for searching, sorting, and problem-solving.",
    },
    SeedSkill {
        name: "Flask",
        category: "Web Development",
        importance_level: 4,
        description: "Building web applications with Flask framework.",
    },
    SeedSkill {
        name: "Django",
        category: "Web Development",
        importance_level: 4,
        description: "Developing robust web applications with Django framework.",
    },
    SeedSkill {
        name: "REST APIs",
        category: "Web Development",
        importance_level: 5,
        description: "Designing and implementing RESTful APIs for web services.",
    },
    SeedSkill {
        name: "HTML/CSS/JavaScript",
        category: "Web Development",
        importance_level: 3,
        description: "Frontend web development basics to complement Python backend skills.",
    },
    SeedSkill {
        name: "Pandas",
        category: "Data Analysis",
        importance_level: 5,
        description: "Data manipulation and analysis with Pandas library.",
    },
    SeedSkill {
        name: "NumPy",
        category: "Data Analysis",
        importance_level: 4,
        description: "Numerical computing with NumPy arrays and functions.",
    },
    SeedSkill {
        name: "Data Visualization",
        category: "Data Analysis",
        importance_level: 4,
        description: "Creating visualizations with Matplotlib, Seaborn, or Plotly.",
    },
    SeedSkill {
        name: "SQL",
        category: "Data Analysis",
        importance_level: 5,
        description: "Writing efficient SQL queries for data extraction and analysis.",
    },
    SeedSkill {
        name: "Scikit-learn",
        category: "Machine Learning",
        importance_level: 4,
        description: "Implementing machine learning algorithms with Scikit-learn.",
    },
    SeedSkill {
        name: "TensorFlow/PyTorch",
        category: "Machine Learning",
        importance_level: 3,
        description: "Building and training deep learning models.",
    },
    SeedSkill {
        name: "Machine Learning Concepts",
        category: "Machine Learning",
        importance_level: 4,
        description: "Understanding classification, regression, clustering, and model evaluation.",
    },
    SeedSkill {
        name: "Git Version Control",
        category: "DevOps",
        importance_level: 5,
        description: "Using Git for source code management and collaboration.",
    },
    SeedSkill {
        name: "Docker",
        category: "DevOps",
        importance_level: 3,
        description: "Containerizing applications for consistent deployment.",
    },
    SeedSkill {
        name: "CI/CD",
        category: "DevOps",
        importance_level: 3,
        description: "Setting up continuous integration and deployment pipelines.",
    },
    SeedSkill {
        name: "PostgreSQL",
        category: "Database",
        importance_level: 4,
        description: "Working with PostgreSQL databases in Python applications.",
    },
    SeedSkill {
        name: "SQLAlchemy",
        category: "Database",
        importance_level: 4,
        description: "Using SQLAlchemy ORM for database operations in Python.",
    },
    SeedSkill {
        name: "Database Design",
        category: "Database",
        importance_level: 4,
        description: "Designing efficient database schemas and relationships.",
    },
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: u64,
    pub resources: u64,
    pub skills: u64,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        *self == SeedReport::default()
    }
}

/// Loads the fixed catalog in one transaction. A database that already has
/// resource categories is left untouched.
#[instrument(skip(pool))]
pub async fn seed_database(pool: &Pool<Sqlite>) -> Result<SeedReport, AppError> {
    info!("Starting database initialization...");

    let mut tx = pool.begin().await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM resource_categories")
        .fetch_one(&mut *tx)
        .await?;

    if existing > 0 {
        tx.rollback().await?;
        info!(existing, "Database already seeded, skipping");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();

    for category in RESOURCE_CATEGORIES {
        sqlx::query("INSERT INTO resource_categories (name, description) VALUES (?, ?)")
            .bind(category.name)
            .bind(category.description)
            .execute(&mut *tx)
            .await?;
        report.categories += 1;
    }
    info!("Resource categories added.");

    for resource in RESOURCES {
        let res = sqlx::query(
            "INSERT INTO resources (title, url, description, resource_type, category_id, is_free)
             SELECT ?, ?, ?, ?, c.id, ?
             FROM resource_categories c WHERE c.name = ?",
        )
        .bind(resource.title)
        .bind(resource.url)
        .bind(resource.description)
        .bind(resource.resource_type)
        .bind(resource.is_free)
        .bind(resource.category)
        .execute(&mut *tx)
        .await?;
        report.resources += res.rows_affected();
    }

    for skill in JOB_SKILLS {
        sqlx::query(
            "INSERT INTO job_skills (name, category, description, importance_level)
             VALUES (?, ?, ?, ?)",
        )
        .bind(skill.name)
        .bind(skill.category)
        .bind(skill.description)
        .bind(skill.importance_level)
        .execute(&mut *tx)
        .await?;
        report.skills += 1;
    }

    tx.commit().await?;
    info!(
        categories = report.categories,
        resources = report.resources,
        skills = report.skills,
        "Database initialized with sample data."
    );

    Ok(report)
}
