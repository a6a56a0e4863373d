use serde::{Deserialize, Serialize};
use time::{
    macros::{date, format_description},
    Date,
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A single enrollee as held by the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    // assigned by the store, never by the caller
    pub id: String,
    pub name: String,
    // not validated here
    pub email: String,
    // free text, not checked against the course catalog
    pub course: String,
    #[serde(with = "iso_date")]
    pub enrollment_date: Date,
    // `None` means not yet graded
    pub grade: Option<String>,
    pub image_url: Option<String>,
}

/// Every student field except the id, as submitted by the add-student form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub course: String,
    #[serde(with = "iso_date")]
    pub enrollment_date: Date,
    pub grade: Option<String>,
    pub image_url: Option<String>,
}

/// Partial update of a student.
///
/// A `None` field is left untouched. For the optional fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub enrollment_date: Option<Date>,
    pub grade: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

/// An entry of the course catalog.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    pub id: &'static str,
    pub name: &'static str,
}

/// Courses offered as filter choices, in display order.
pub const COURSES: [Course; 4] = [
    Course {
        id: "cs",
        name: "Computer Science",
    },
    Course {
        id: "ds",
        name: "Data Science",
    },
    Course {
        id: "wd",
        name: "Web Development",
    },
    Course {
        id: "cy",
        name: "Cybersecurity",
    },
];

impl Student {
    pub fn new(id: String, fields: NewStudent) -> Self {
        let NewStudent {
            name,
            email,
            course,
            enrollment_date,
            grade,
            image_url,
        } = fields;
        Self {
            id,
            name,
            email,
            course,
            enrollment_date,
            grade,
            image_url,
        }
    }

    /// merge the supplied fields of `patch` into this record
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(course) = patch.course {
            self.course = course;
        }
        if let Some(enrollment_date) = patch.enrollment_date {
            self.enrollment_date = enrollment_date;
        }
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
    }
}

impl NewStudent {
    pub fn new(name: &str, email: &str, course: &str, enrollment_date: Date) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            course: course.to_string(),
            enrollment_date,
            grade: None,
            image_url: None,
        }
    }

    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = Some(grade.to_string());
        self
    }

    pub fn with_image_url(mut self, image_url: &str) -> Self {
        self.image_url = Some(image_url.to_string());
        self
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}

/// Placeholder portrait for a student created without an image.
pub fn portrait_url(id: &str) -> String {
    let gender = match id.bytes().last() {
        Some(digit) if digit % 2 == 0 => "women",
        _ => "men",
    };
    format!("https://randomuser.me/api/portraits/{}/{}.jpg", gender, id)
}

/// The records every freshly seeded store starts with, ids "1" to "5".
pub fn seed_students() -> Vec<Student> {
    let rows = [
        (
            "John Doe",
            "john.doe@example.com",
            "Computer Science",
            date!(2023 - 09 - 01),
            "A",
        ),
        (
            "Jane Smith",
            "jane.smith@example.com",
            "Data Science",
            date!(2023 - 09 - 05),
            "B+",
        ),
        (
            "Michael Johnson",
            "michael.johnson@example.com",
            "Web Development",
            date!(2023 - 08 - 15),
            "A-",
        ),
        (
            "Emily Brown",
            "emily.brown@example.com",
            "Computer Science",
            date!(2023 - 09 - 10),
            "B",
        ),
        (
            "David Wilson",
            "david.wilson@example.com",
            "Cybersecurity",
            date!(2023 - 08 - 20),
            "A+",
        ),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(idx, (name, email, course, enrolled, grade))| {
            let id = (idx + 1).to_string();
            let image_url = portrait_url(&id);
            Student::new(
                id,
                NewStudent::new(name, email, course, enrolled)
                    .with_grade(grade)
                    .with_image_url(&image_url),
            )
        })
        .collect()
}
