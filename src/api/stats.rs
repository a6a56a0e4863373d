use serde::Serialize;

use super::student::Student;

/// Enrollment of one course within a collection.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseShare {
    pub course: String,
    pub count: usize,
    /// share of the whole collection, rounded to a whole percent
    pub percentage: u32,
}

/// Everything the dashboard shows.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_students: usize,
    pub total_courses: usize,
    pub course_distribution: Vec<CourseShare>,
}

pub fn total_count(students: &[Student]) -> usize {
    students.len()
}

/// Course values present in `students`, in first-seen order.
pub fn distinct_courses(students: &[Student]) -> Vec<String> {
    let mut courses: Vec<String> = Vec::new();
    for student in students {
        if !courses.contains(&student.course) {
            courses.push(student.course.clone());
        }
    }
    courses
}

/// Per-course enrollment count and rounded percentage, empty for an empty collection.
pub fn course_distribution(students: &[Student]) -> Vec<CourseShare> {
    let total = total_count(students);
    if total == 0 {
        return Vec::new();
    }
    distinct_courses(students)
        .into_iter()
        .map(|course| {
            let count = students.iter().filter(|s| s.course == course).count();
            let percentage = (count as f64 / total as f64 * 100.0).round() as u32;
            CourseShare {
                course,
                count,
                percentage,
            }
        })
        .collect()
}

impl DashboardSummary {
    pub fn from_students(students: &[Student]) -> Self {
        let course_distribution = course_distribution(students);
        Self {
            total_students: total_count(students),
            total_courses: distinct_courses(students).len(),
            course_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::student::{seed_students, NewStudent};
    use time::macros::date;

    fn in_course(id: usize, course: &str) -> Student {
        Student::new(
            id.to_string(),
            NewStudent::new("Someone", "someone@example.com", course, date!(2024 - 02 - 01)),
        )
    }

    #[test]
    fn test_seed_dashboard() {
        let students = seed_students();
        assert_eq!(total_count(&students), 5);
        assert_eq!(
            distinct_courses(&students),
            [
                "Computer Science",
                "Data Science",
                "Web Development",
                "Cybersecurity"
            ]
        );

        let distribution = course_distribution(&students);
        assert_eq!(distribution.len(), 4);
        assert_eq!(
            distribution[0],
            CourseShare {
                course: "Computer Science".to_string(),
                count: 2,
                percentage: 40,
            }
        );
        assert!(distribution[1..].iter().all(|share| share.count == 1 && share.percentage == 20));
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(total_count(&[]), 0);
        assert!(distinct_courses(&[]).is_empty());
        assert!(course_distribution(&[]).is_empty());
    }

    #[test]
    fn test_distinct_courses_first_seen_order() {
        let students = vec![
            in_course(1, "Web Development"),
            in_course(2, "Cybersecurity"),
            in_course(3, "Web Development"),
            in_course(4, "Data Science"),
        ];
        assert_eq!(
            distinct_courses(&students),
            ["Web Development", "Cybersecurity", "Data Science"]
        );
    }

    #[test]
    fn test_distribution_is_case_sensitive() {
        let students = vec![in_course(1, "Data Science"), in_course(2, "data science")];
        let distribution = course_distribution(&students);
        assert_eq!(distribution.len(), 2);
        assert!(distribution.iter().all(|share| share.count == 1 && share.percentage == 50));
    }

    #[test]
    fn test_percentages_sum_to_about_100() {
        let students = vec![
            in_course(1, "Computer Science"),
            in_course(2, "Data Science"),
            in_course(3, "Cybersecurity"),
        ];
        let distribution = course_distribution(&students);
        let sum: u32 = distribution.iter().map(|share| share.percentage).sum();
        assert_eq!(sum, 99);
        assert!((98..=102).contains(&sum));

        let mut students: Vec<Student> = (0..7).map(|i| in_course(i, "Data Science")).collect();
        students.extend((7..10).map(|i| in_course(i, "Web Development")));
        let percentages: Vec<u32> = course_distribution(&students)
            .iter()
            .map(|share| share.percentage)
            .collect();
        assert_eq!(percentages, [70, 30]);
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = DashboardSummary::from_students(&seed_students());
        assert_eq!(summary.total_students, 5);
        assert_eq!(summary.total_courses, 4);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalStudents"], 5);
        assert_eq!(json["courseDistribution"][0]["percentage"], 40);
    }
}
