use std::path::Path;

use log::info;
use serde::Deserialize;

use super::err::CustomError;
use super::store::StudentStore;
use super::student::{self, NewStudent, Student};

// one csv row
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentRow {
    name: String,
    email: String,
    course: String,
    // YYYY-MM-DD
    enrollment_date: String,
    #[serde(default)]
    grade: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

/// Reads students from a headered csv file.
///
/// Expected columns: `name,email,course,enrollmentDate`, optionally followed by `grade` and
/// `imageUrl`. Empty optional cells are read as absent.
pub struct StudentCsvImporter<'importer> {
    csv_path: &'importer Path,
}

impl<'importer> StudentCsvImporter<'importer> {
    pub fn new(csv_path: &'importer Path) -> Self {
        Self { csv_path }
    }

    pub fn build(&self) -> Result<Vec<NewStudent>, CustomError> {
        let file = std::fs::File::open(self.csv_path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut students = vec![];

        for (idx, row) in rdr.deserialize().enumerate() {
            let row: StudentRow = row?;
            students.push(row_to_student(idx + 1, row)?);
        }
        Ok(students)
    }

    /// create every row through `store`, returning the stored records in file order
    pub async fn import_into(&self, store: &StudentStore) -> Result<Vec<Student>, CustomError> {
        let rows = self.build()?;
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            created.push(store.create(row).await);
        }
        info!(
            "imported {} students from {}",
            created.len(),
            self.csv_path.display()
        );
        Ok(created)
    }
}

fn row_to_student(row_no: usize, row: StudentRow) -> Result<NewStudent, CustomError> {
    let name = row.name.trim();
    if name.is_empty() {
        return Err(CustomError::CsvDataError(format!(
            "row {}: name is empty",
            row_no
        )));
    }
    let enrollment_date = student::parse_date(row.enrollment_date.trim()).map_err(|err| {
        CustomError::CsvDataError(format!(
            "row {}: invalid enrollment date \"{}\": {}",
            row_no, row.enrollment_date, err
        ))
    })?;

    Ok(NewStudent {
        name: name.to_string(),
        email: row.email.trim().to_string(),
        course: row.course.trim().to_string(),
        enrollment_date,
        grade: non_blank(row.grade),
        image_url: non_blank(row.image_url),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
