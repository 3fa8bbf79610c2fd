//! Storage initialization
//!
//! Handles first-run setup: directories, the settings file and empty tables.

use crate::config::paths::FinancePaths;
use crate::config::Settings;
use crate::error::FinanceError;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Existing settings and records are kept; missing table files are created
/// empty.
pub fn initialize_storage(paths: &FinancePaths) -> Result<(), FinanceError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::load_or_create(paths)?.save(paths)?;
    }

    let storage = Storage::open(paths.clone())?;
    storage.save_all()?;

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinancePaths) -> bool {
    !paths.is_initialized() || !paths.users_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file_io::write_json_atomic;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.settings_file().exists());
        assert!(paths.expenses_file().exists());
        assert!(paths.savings_file().exists());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        write_json_atomic(
            paths.incomes_file(),
            &serde_json::json!({
                "nextId": 8,
                "records": [{
                    "id": 7, "userId": 1, "amount": 1200.0, "source": "Salary",
                    "date": "2025-01-31", "description": "", "frequency": "MONTHLY",
                    "createdAt": "2025-01-31T08:00:00Z", "updatedAt": "2025-01-31T08:00:00Z"
                }]
            }),
        )
        .unwrap();

        initialize_storage(&paths).unwrap();

        let storage = Storage::open(paths).unwrap();
        assert_eq!(storage.incomes.count().unwrap(), 1);
    }
}
