//! Puzzle input lookup on the local filesystem

use crate::error::InputError;
use std::fs;
use std::path::PathBuf;

/// Where puzzle inputs are read from
///
/// For a year/day the directory is searched in order:
/// 1. `{dir}/{year}/day{day:02}.txt`
/// 2. `{dir}/day{day}/input.txt`
///
/// An explicit file, when set, is used for every lookup.
#[derive(Debug, Clone)]
pub struct InputSource {
    dir: PathBuf,
    file: Option<PathBuf>,
}

impl InputSource {
    pub fn new(dir: PathBuf, file: Option<PathBuf>) -> Self {
        Self { dir, file }
    }

    /// Paths tried for a year/day, in lookup order
    pub fn candidates(&self, year: u16, day: u8) -> Vec<PathBuf> {
        match &self.file {
            Some(file) => vec![file.clone()],
            None => vec![
                self.dir
                    .join(year.to_string())
                    .join(format!("day{:02}.txt", day)),
                self.dir.join(format!("day{}", day)).join("input.txt"),
            ],
        }
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let searched = self.candidates(year, day);
        let Some(path) = searched.iter().find(|p| p.is_file()) else {
            return Err(InputError::NotFound { searched });
        };
        fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.clone(),
            source,
        })
    }
}
