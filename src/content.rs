//! Read-only curriculum tables rendered by the content pages.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct LearningPath {
    pub id: &'static str,
    pub level: &'static str,
    pub description: &'static str,
    pub topics: &'static [Topic],
}

#[derive(Debug, Serialize)]
pub struct Topic {
    pub title: &'static str,
    pub description: &'static str,
    pub subtopics: &'static [&'static str],
    pub time_estimate: &'static str,
    /// Lesson page for the topic; doubles as the topic id in progress rows.
    pub route: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    pub estimated_hours: u32,
    pub skills_practiced: &'static [&'static str],
    pub instructions: &'static [&'static str],
    pub extension_ideas: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub title: &'static str,
    pub difficulty: &'static str,
    pub topic: &'static str,
    pub description: &'static str,
    pub hints: &'static [&'static str],
}

pub static LEARNING_PATHS: &[LearningPath] = &[
    LearningPath {
        id: "beginner",
        level: "Beginner",
        description: "Start your Python journey with the fundamentals",
        topics: &[
            Topic {
                title: "Python Basics",
                description: "Learn the core syntax and concepts of Python",
                subtopics: &[
                    "Installing Python and setting up your environment",
                    "Variables, data types, and basic operations",
                    "Control flow: if statements, loops",
                    "Functions and modules",
                    "Basic data structures: lists, dictionaries, tuples, sets",
                    "File I/O operations",
                ],
                time_estimate: "2-3 weeks",
                route: "python_basics",
            },
            Topic {
                title: "Object-Oriented Programming",
                description: "Master the principles of OOP in Python",
                subtopics: &[
                    "Classes and objects",
                    "Inheritance and polymorphism",
                    "Encapsulation and abstraction",
                    "Magic methods and operator overloading",
                    "Properties and descriptors",
                ],
                time_estimate: "2 weeks",
                route: "object_oriented",
            },
            Topic {
                title: "Error Handling",
                description: "Learn to handle exceptions and write robust code",
                subtopics: &[
                    "Understanding exceptions",
                    "Try-except blocks",
                    "Raising exceptions",
                    "Custom exception classes",
                    "Context managers (with statement)",
                ],
                time_estimate: "1 week",
                route: "error_handling",
            },
        ],
    },
    LearningPath {
        id: "intermediate",
        level: "Intermediate",
        description: "Enhance your Python skills with advanced concepts",
        topics: &[
            Topic {
                title: "Advanced Python Features",
                description: "Explore Python's powerful features for efficient coding",
                subtopics: &[
                    "Decorators and closures",
                    "Generators and iterators",
                    "Context managers",
                    "Lambda functions and functional programming",
                    "Type hinting and annotations",
                    "Advanced OOP patterns",
                ],
                time_estimate: "2-3 weeks",
                route: "advanced_python",
            },
            Topic {
                title: "Data Analysis with Python",
                description: "Learn to analyze and visualize data using Python libraries",
                subtopics: &[
                    "Introduction to NumPy",
                    "Data manipulation with Pandas",
                    "Data visualization with Matplotlib and Seaborn",
                    "Basic statistical analysis",
                    "Working with CSV, JSON, and Excel files",
                    "Web scraping for data collection",
                ],
                time_estimate: "3-4 weeks",
                route: "data_analysis",
            },
            Topic {
                title: "Web Development Basics",
                description: "Build web applications using Python frameworks",
                subtopics: &[
                    "Introduction to web development concepts",
                    "Flask framework basics",
                    "Building RESTful APIs",
                    "Database integration with SQLAlchemy",
                    "Authentication and authorization",
                    "Deployment basics",
                ],
                time_estimate: "4 weeks",
                route: "web_development",
            },
        ],
    },
];

pub static PROJECTS: &[Project] = &[
    Project {
        id: "beginner-1",
        title: "Command Line To-Do List Application",
        description: "Build a simple command line application to manage to-do items with basic CRUD operations.",
        difficulty: "Beginner",
        estimated_hours: 4,
        skills_practiced: &["Basic Python syntax", "File I/O", "Data structures"],
        instructions: &[
            "Create a command line interface that allows users to add, view, update, and delete tasks",
            "Store tasks in a text or JSON file",
            "Implement basic error handling",
            "Add the ability to mark tasks as complete",
            "Include a help command to show available options",
        ],
        extension_ideas: &[
            "Add due dates for tasks",
            "Implement task categories or priorities",
            "Add a search function",
            "Create a simple statistics feature (e.g., percentage of completed tasks)",
        ],
    },
    Project {
        id: "beginner-2",
        title: "Number Guessing Game",
        description: "Write an interactive game where the player guesses a randomly chosen number.",
        difficulty: "Beginner",
        estimated_hours: 2,
        skills_practiced: &["Control flow", "User input", "The random module"],
        instructions: &[
            "Pick a random number between 1 and 100",
            "Ask the player for guesses until they find the number",
            "Tell the player whether each guess is too high or too low",
            "Reject input that is not a number",
            "Report the number of attempts at the end",
        ],
        extension_ideas: &[
            "Add difficulty levels with different ranges",
            "Keep a high score table in a file",
            "Limit the number of attempts",
        ],
    },
    Project {
        id: "intermediate-1",
        title: "Expense Tracker with Data Analysis",
        description: "Record personal expenses in CSV files and produce monthly spending reports.",
        difficulty: "Intermediate",
        estimated_hours: 8,
        skills_practiced: &["Pandas", "CSV handling", "Data visualization"],
        instructions: &[
            "Design a CSV layout for expenses with date, category and amount",
            "Write a command to append new expenses",
            "Load the data with Pandas and group spending by month and category",
            "Plot monthly totals with Matplotlib",
            "Export a summary report",
        ],
        extension_ideas: &[
            "Add budgets per category with warnings",
            "Import bank statements",
            "Build an interactive dashboard",
        ],
    },
    Project {
        id: "intermediate-2",
        title: "RESTful Notes API",
        description: "Build a small web API for creating, listing and searching notes.",
        difficulty: "Intermediate",
        estimated_hours: 10,
        skills_practiced: &["Flask", "REST design", "SQLAlchemy"],
        instructions: &[
            "Define a Note model with title, body and timestamps",
            "Expose endpoints to create, read, update and delete notes",
            "Validate request payloads and return proper status codes",
            "Add a search endpoint filtering by keyword",
            "Write tests for each endpoint",
        ],
        extension_ideas: &[
            "Add user accounts with token authentication",
            "Support tagging notes",
            "Paginate list results",
        ],
    },
    Project {
        id: "advanced-1",
        title: "Web Scraper and Price Monitor",
        description: "Track product prices across sites and alert when they drop below a threshold.",
        difficulty: "Advanced",
        estimated_hours: 15,
        skills_practiced: &["Web scraping", "Scheduling", "Databases", "Error handling"],
        instructions: &[
            "Scrape product pages and extract name and price",
            "Store price history in a database",
            "Run the scraper on a schedule",
            "Send an email alert when a price falls below the configured threshold",
            "Handle network failures and layout changes gracefully",
        ],
        extension_ideas: &[
            "Plot price history charts",
            "Support many retailers through pluggable parsers",
            "Expose the data through a small web interface",
        ],
    },
];

pub static EXERCISES: &[Exercise] = &[
    Exercise {
        id: "fizzbuzz",
        title: "FizzBuzz",
        difficulty: "Beginner",
        topic: "Control flow",
        description: "Print the numbers from 1 to 100, replacing multiples of 3 with \"Fizz\", multiples of 5 with \"Buzz\" and multiples of both with \"FizzBuzz\".",
        hints: &["Use the modulo operator", "Check the combined case first"],
    },
    Exercise {
        id: "palindrome",
        title: "Palindrome Checker",
        difficulty: "Beginner",
        topic: "Strings",
        description: "Write a function that reports whether a phrase reads the same forwards and backwards, ignoring case, spaces and punctuation.",
        hints: &["Normalize the string first", "Slicing with [::-1] reverses a string"],
    },
    Exercise {
        id: "word-count",
        title: "Word Frequency Counter",
        difficulty: "Beginner",
        topic: "Dictionaries",
        description: "Read a text file and print the ten most common words with their counts.",
        hints: &["collections.Counter does most of the work", "Strip punctuation before counting"],
    },
    Exercise {
        id: "bank-account",
        title: "Bank Account Class",
        difficulty: "Intermediate",
        topic: "Object-oriented programming",
        description: "Model a bank account with deposit, withdraw and balance operations, raising a custom exception on overdraft.",
        hints: &["Keep the balance private by convention", "Subclass Exception for the overdraft error"],
    },
    Exercise {
        id: "timing-decorator",
        title: "Timing Decorator",
        difficulty: "Intermediate",
        topic: "Decorators",
        description: "Write a decorator that prints how long the wrapped function took to run.",
        hints: &["time.perf_counter gives precise timings", "Use functools.wraps to keep the function name"],
    },
    Exercise {
        id: "fibonacci-generator",
        title: "Fibonacci Generator",
        difficulty: "Intermediate",
        topic: "Generators",
        description: "Implement an infinite generator of Fibonacci numbers and use itertools.islice to take the first twenty.",
        hints: &["Keep two running values", "yield inside a while True loop"],
    },
];

static PROJECT_INDEX: Lazy<HashMap<&'static str, &'static Project>> =
    Lazy::new(|| PROJECTS.iter().map(|project| (project.id, project)).collect());

static EXERCISE_INDEX: Lazy<HashMap<&'static str, &'static Exercise>> =
    Lazy::new(|| EXERCISES.iter().map(|exercise| (exercise.id, exercise)).collect());

pub fn find_topic(path_id: &str, topic_id: &str) -> Option<&'static Topic> {
    LEARNING_PATHS
        .iter()
        .find(|path| path.id == path_id)?
        .topics
        .iter()
        .find(|topic| topic.route == topic_id)
}

pub fn find_project(project_id: &str) -> Option<&'static Project> {
    PROJECT_INDEX.get(project_id).copied()
}

pub fn find_exercise(exercise_id: &str) -> Option<&'static Exercise> {
    EXERCISE_INDEX.get(exercise_id).copied()
}

/// Kinds of content a note can be attached to.
pub const NOTE_CONTENT_TYPES: &[&str] = &["learning_path", "project", "exercise", "lesson"];

/// Whether a note target names something that is actually published.
pub fn content_exists(content_type: &str, content_id: &str) -> bool {
    match content_type {
        "learning_path" => LEARNING_PATHS.iter().any(|path| path.id == content_id),
        "project" => find_project(content_id).is_some(),
        "exercise" => find_exercise(content_id).is_some(),
        "lesson" => LEARNING_PATHS
            .iter()
            .flat_map(|path| path.topics.iter())
            .any(|topic| topic.route == content_id),
        _ => false,
    }
}
