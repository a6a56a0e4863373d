//! Read-only views over a student collection.
//!
//! Nothing here touches the store; callers pass in a snapshot and get a filtered copy back.

use super::student::Student;

/// Course filter value meaning "every course".
pub const ALL_COURSES: &str = "all";

/// Students whose course equals `course`, ignoring case.
///
/// `"all"` or an empty course returns the input unchanged. Matching is exact, so
/// `"Computer"` does not select `"Computer Science"`.
pub fn by_course(students: &[Student], course: &str) -> Vec<Student> {
    if course.is_empty() || course == ALL_COURSES {
        return students.to_vec();
    }
    let course = course.to_lowercase();
    students
        .iter()
        .filter(|s| s.course.to_lowercase() == course)
        .cloned()
        .collect()
}

/// Students whose name or email contains `query`, ignoring case.
pub fn by_search(students: &[Student], query: &str) -> Vec<Student> {
    if query.is_empty() {
        return students.to_vec();
    }
    let query = query.to_lowercase();
    students
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&query) || s.email.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// The filter state of the student list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// `None` behaves like [`ALL_COURSES`]
    pub course: Option<String>,
    pub search: String,
}

impl StudentFilter {
    pub fn new(course: Option<&str>, search: &str) -> Self {
        Self {
            course: course.map(str::to_string),
            search: search.to_string(),
        }
    }

    /// whether any filter narrows the collection
    pub fn is_active(&self) -> bool {
        let course_active = matches!(&self.course, Some(c) if !c.is_empty() && c != ALL_COURSES);
        course_active || !self.search.is_empty()
    }

    /// course filter first, then search over what is left
    pub fn apply(&self, students: &[Student]) -> Vec<Student> {
        let by_course = by_course(students, self.course.as_deref().unwrap_or(ALL_COURSES));
        by_search(&by_course, &self.search)
    }
}
