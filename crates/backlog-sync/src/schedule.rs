//! Static sprint schedule and task generation.
//!
//! The backlog is embedded data: a table mapping sprint numbers to task
//! templates, expanded once per run into immutable [`Task`] values with
//! derived sprint dates. Generation is pure and restartable; invoking
//! [`produce_tasks`] twice yields identical sequences.

use chrono::{Duration, NaiveDate};

use crate::task::{Priority, Task};

/// First day of sprint 1.
const BASE_YMD: (i32, u32, u32) = (2024, 9, 10);

/// Days between the start of consecutive sprints.
///
/// Intentionally one day longer than [`SPRINT_DURATION_DAYS`]; the gap is
/// part of the published schedule and must not be "fixed".
const SPRINT_OFFSET_DAYS: i64 = 15;

/// Length of one sprint window, start to end.
const SPRINT_DURATION_DAYS: i64 = 14;

/// First day of sprint 1 as a [`NaiveDate`].
#[must_use]
pub fn base_date() -> NaiveDate {
    let (y, m, d) = BASE_YMD;
    NaiveDate::from_ymd_opt(y, m, d).expect("base date literal is valid")
}

/// One row of the embedded schedule table.
struct TaskTemplate {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    estimation_days: u32,
    priority: Priority,
    acceptance_criteria: &'static str,
    labels: &'static [&'static str],
}

/// Sprint number -> ordered task templates for that sprint.
const SCHEDULE: &[(u32, &[TaskTemplate])] = &[
    (
        1,
        &[
            TaskTemplate {
                id: "TASK-001",
                title: "Set up Git repository with microservices structure",
                description: "Establish the base repository structure with frontend/backend/docs \
                              separation and initial configuration",
                estimation_days: 1,
                priority: Priority::High,
                acceptance_criteria: "Repo with frontend/backend/docs structure",
                labels: &["setup", "git", "infrastructure"],
            },
            TaskTemplate {
                id: "TASK-002",
                title: "Set up Docker and Docker Compose for development",
                description: "Create containers for MySQL, Redis, Go and Angular with a \
                              development configuration",
                estimation_days: 2,
                priority: Priority::High,
                acceptance_criteria: "Containers running for MySQL, Redis, Go, Angular",
                labels: &["docker", "infrastructure", "setup"],
            },
            TaskTemplate {
                id: "TASK-003",
                title: "Set up basic CI/CD pipeline with GitHub Actions",
                description: "Implement a continuous-integration pipeline for automatic tests \
                              and builds",
                estimation_days: 2,
                priority: Priority::Medium,
                acceptance_criteria: "Pipeline running tests and automatic builds",
                labels: &["ci-cd", "github-actions", "automation"],
            },
            TaskTemplate {
                id: "TASK-004",
                title: "Implement authentication microservice in Go",
                description: "Develop the authentication service with JWT, registration and \
                              login",
                estimation_days: 3,
                priority: Priority::High,
                acceptance_criteria: "JWT, registration, login, auth middleware",
                labels: &["backend", "go", "authentication", "jwt"],
            },
            TaskTemplate {
                id: "TASK-005",
                title: "Set up MySQL database with migrations",
                description: "Establish the database schema with automatic migrations",
                estimation_days: 2,
                priority: Priority::High,
                acceptance_criteria: "Initial schema, automatic migrations with GORM",
                labels: &["database", "mysql", "migrations", "gorm"],
            },
            TaskTemplate {
                id: "TASK-006",
                title: "Set up Angular 20 project with base architecture",
                description: "Establish the Angular project with routing, guards and \
                              interceptors",
                estimation_days: 2,
                priority: Priority::High,
                acceptance_criteria: "Project with routing, guards, interceptors",
                labels: &["frontend", "angular", "architecture"],
            },
            TaskTemplate {
                id: "TASK-007",
                title: "Implement authentication components (login/registration)",
                description: "Create reactive login and registration forms with validations",
                estimation_days: 3,
                priority: Priority::High,
                acceptance_criteria: "Reactive forms, validations, API integration",
                labels: &["frontend", "angular", "authentication", "forms"],
            },
        ],
    ),
    (
        2,
        &[
            TaskTemplate {
                id: "TASK-008",
                title: "Implement user management microservice",
                description: "Develop full CRUD for user and profile management",
                estimation_days: 3,
                priority: Priority::High,
                acceptance_criteria: "User CRUD, profiles, roles",
                labels: &["backend", "go", "users", "crud"],
            },
            TaskTemplate {
                id: "TASK-009",
                title: "Implement roles and permissions system",
                description: "Create the authorization system with admin and user roles",
                estimation_days: 3,
                priority: Priority::High,
                acceptance_criteria: "Roles (admin, user), authorization middleware",
                labels: &["backend", "authorization", "roles", "permissions"],
            },
            TaskTemplate {
                id: "TASK-010",
                title: "Create main layout with navigation",
                description: "Develop the base layout with sidebar, header and working routing",
                estimation_days: 2,
                priority: Priority::High,
                acceptance_criteria: "Sidebar, header, working routing",
                labels: &["frontend", "layout", "navigation", "ui"],
            },
            TaskTemplate {
                id: "TASK-011",
                title: "Implement basic dashboard with widgets",
                description: "Create a responsive dashboard with account summary and charts",
                estimation_days: 4,
                priority: Priority::High,
                acceptance_criteria: "Account summary, basic charts, responsive",
                labels: &["frontend", "dashboard", "widgets", "charts"],
            },
            TaskTemplate {
                id: "TASK-012",
                title: "Implement unit tests for authentication",
                description: "Create a unit test suite with coverage above 80%",
                estimation_days: 2,
                priority: Priority::Medium,
                acceptance_criteria: "Coverage above 80% on the auth service",
                labels: &["testing", "unit-tests", "coverage"],
            },
            TaskTemplate {
                id: "TASK-013",
                title: "Document APIs with Swagger/OpenAPI",
                description: "Generate interactive API documentation",
                estimation_days: 1,
                priority: Priority::Medium,
                acceptance_criteria: "Interactive documentation available",
                labels: &["documentation", "swagger", "api"],
            },
        ],
    ),
];

/// First day of the given sprint.
///
/// Sprint numbers start at 1; callers must not pass 0.
#[must_use]
pub fn sprint_start(sprint: u32) -> NaiveDate {
    debug_assert!(sprint >= 1, "sprint numbers start at 1");
    base_date() + Duration::days(i64::from(sprint - 1) * SPRINT_OFFSET_DAYS)
}

/// Expand the schedule table into the ordered task sequence.
///
/// Pure data construction: no I/O, no failure modes, same output on
/// every call.
#[must_use]
pub fn produce_tasks() -> Vec<Task> {
    let mut tasks = Vec::new();

    for (sprint, templates) in SCHEDULE {
        let start = sprint_start(*sprint);
        let end = start + Duration::days(SPRINT_DURATION_DAYS);

        for template in *templates {
            tasks.push(Task {
                id: template.id.to_string(),
                title: template.title.to_string(),
                description: template.description.to_string(),
                sprint: *sprint,
                estimation_days: template.estimation_days,
                priority: template.priority,
                acceptance_criteria: template.acceptance_criteria.to_string(),
                start_date: start,
                end_date: end,
                dependencies: Vec::new(),
                labels: template.labels.iter().map(ToString::to_string).collect(),
            });
        }
    }

    tasks
}
