//! Per-category CSV output
//!
//! Each category gets its own folder under the output root, holding one
//! CSV file (`<category>.csv` or `<category>_<YYYY-MM-DD>.csv`) and the
//! item images.

use crate::extract::{ItemRecord, CSV_HEADERS};
use crate::WriteError;
use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes one category's records to its CSV file
pub struct CategoryWriter {
    dir: PathBuf,
    csv_path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl CategoryWriter {
    /// Creates the category folder and CSV file, writing the header row
    ///
    /// The folder is created if missing; an existing CSV file with the same
    /// name is truncated.
    ///
    /// # Arguments
    ///
    /// * `root` - The output root directory
    /// * `category` - The category display name
    /// * `date` - Run date appended to the file name, if stamping is enabled
    pub fn create(root: &Path, category: &str, date: Option<NaiveDate>) -> Result<Self, WriteError> {
        let folder = category_dir_name(category);
        let dir = root.join(&folder);
        std::fs::create_dir_all(&dir).map_err(|source| WriteError::Io {
            path: dir.clone(),
            source,
        })?;

        let csv_path = dir.join(csv_file_name(&folder, date));
        let file = File::create(&csv_path).map_err(|source| WriteError::Io {
            path: csv_path.clone(),
            source,
        })?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADERS)?;

        Ok(Self {
            dir,
            csv_path,
            writer,
            rows: 0,
        })
    }

    /// The category folder, where images are saved too
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Data rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Appends one record as a row
    pub fn write_record(&mut self, record: &ItemRecord) -> Result<(), WriteError> {
        self.writer.write_record(record.to_csv_row())?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes the file and returns its path
    pub fn finish(mut self) -> Result<PathBuf, WriteError> {
        self.writer.flush().map_err(|source| WriteError::Io {
            path: self.csv_path.clone(),
            source,
        })?;
        Ok(self.csv_path)
    }
}

/// Folder name for a category (path separators replaced)
pub fn category_dir_name(category: &str) -> String {
    category.trim().replace(['/', '\\'], "-")
}

/// CSV file name for a category, optionally date-stamped
///
/// # Examples
///
/// ```
/// use catalogue_scraper::output::csv_file_name;
/// use chrono::NaiveDate;
///
/// assert_eq!(csv_file_name("Poetry", None), "Poetry.csv");
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9);
/// assert_eq!(csv_file_name("Poetry", date), "Poetry_2024-03-09.csv");
/// ```
pub fn csv_file_name(category: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{}_{}.csv", category, date.format("%Y-%m-%d")),
        None => format!("{}.csv", category),
    }
}
