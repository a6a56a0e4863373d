use std::sync::Arc;

use log::info;

pub mod config;
pub mod csv_import;
pub mod err;
pub mod query;
pub mod session;
pub mod stats;
pub mod store;
pub mod student;

use config::Config;
use csv_import::StudentCsvImporter;
use err::CustomError;
use query::StudentFilter;
use session::{MockSessionProvider, SessionProvider};
use stats::DashboardSummary;
use store::StudentStore;
use student::Student;

/// Everything the pages share: the student store and the session provider.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StudentStore>,
    pub session: Arc<dyn SessionProvider>,
}

impl AppState {
    pub async fn build(config: &Config) -> Result<Self, CustomError> {
        let store = if config.seed {
            StudentStore::seeded(config.delay)
        } else {
            StudentStore::new(config.delay)
        };

        if let Some(path) = &config.import_csv {
            StudentCsvImporter::new(path).import_into(&store).await?;
        }
        info!(
            "student store ready with {} students, {:?} delay",
            store.len().await,
            config.delay
        );

        let session = MockSessionProvider::with_demo_account();
        session.ready();

        Ok(Self::new(Arc::new(store), Arc::new(session)))
    }

    pub fn new(store: Arc<StudentStore>, session: Arc<dyn SessionProvider>) -> Self {
        Self { store, session }
    }

    /// statistics over the whole collection
    pub async fn dashboard(&self) -> DashboardSummary {
        let students = self.store.list_all().await;
        DashboardSummary::from_students(&students)
    }

    /// the student list page: course filter first, then search
    pub async fn student_list(&self, filter: &StudentFilter) -> Vec<Student> {
        let students = match filter.course.as_deref() {
            Some(course) if course != query::ALL_COURSES && !course.is_empty() => {
                self.store.filter_by_course(course).await
            }
            _ => self.store.list_all().await,
        };
        query::by_search(&students, &filter.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, time::Duration};
    use tempfile::tempdir;

    fn config() -> Config {
        Config {
            delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_build_seeded_dashboard() {
        let state = AppState::build(&config()).await.unwrap();
        let summary = state.dashboard().await;

        assert_eq!(summary.total_students, 5);
        assert_eq!(summary.total_courses, 4);
        let cs = &summary.course_distribution[0];
        assert_eq!(cs.course, "Computer Science");
        assert_eq!((cs.count, cs.percentage), (2, 40));
        assert!(!state.session.is_loading());
        assert!(state.session.current_user().is_none());

        let user = state
            .session
            .login(session::DEMO_EMAIL, session::DEMO_PASSWORD)
            .await
            .unwrap();
        assert_eq!(state.session.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_build_empty_dashboard() {
        let config = Config {
            seed: false,
            ..config()
        };
        let state = AppState::build(&config).await.unwrap();
        let summary = state.dashboard().await;
        assert_eq!(summary.total_students, 0);
        assert!(summary.course_distribution.is_empty());
    }

    #[tokio::test]
    async fn test_build_with_import() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("students.csv");
        fs::write(
            &path,
            "name,email,course,enrollmentDate\nAda Lovelace,ada@example.com,Data Science,2024-01-15\n",
        )
        .unwrap();

        let config = Config {
            import_csv: Some(path),
            ..config()
        };
        let state = AppState::build(&config).await.unwrap();
        let students = state
            .student_list(&StudentFilter::new(Some("data science"), ""))
            .await;
        let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Jane Smith", "Ada Lovelace"]);
    }

    #[tokio::test]
    async fn test_build_with_missing_import() {
        let config = Config {
            import_csv: Some("does/not/exist.csv".into()),
            ..config()
        };
        let result = AppState::build(&config).await;
        assert!(matches!(result, Err(CustomError::FileReadError(_))));
    }

    #[tokio::test]
    async fn test_student_list_matches_filter_apply() {
        let state = AppState::build(&config()).await.unwrap();
        let all = state.store.list_all().await;

        for filter in [
            StudentFilter::default(),
            StudentFilter::new(Some("all"), "smith"),
            StudentFilter::new(Some("Computer Science"), ""),
            StudentFilter::new(Some("Computer Science"), "EMILY"),
            StudentFilter::new(Some("Computer"), ""),
        ] {
            assert_eq!(state.student_list(&filter).await, filter.apply(&all));
        }
    }

    #[tokio::test]
    async fn test_created_student_without_catalog_course() {
        let state = AppState::build(&config()).await.unwrap();
        let created = state
            .store
            .create(student::NewStudent::new(
                "Off Catalog",
                "off@example.com",
                "Philosophy",
                time::macros::date!(2024 - 03 - 01),
            ))
            .await;

        // stored and listed even though no catalog entry selects it
        assert_eq!(state.store.list_all().await.len(), 6);
        for course in student::COURSES {
            let listed = state
                .student_list(&StudentFilter::new(Some(course.name), ""))
                .await;
            assert!(listed.iter().all(|s| s.id != created.id));
        }
    }
}
