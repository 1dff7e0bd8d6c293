use crate::error::AppError;
use crate::model::Task;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_STORE_FILE: &str = "tasks.json";

/// Reads the task array at `path`. `Ok(None)` means there is no file yet.
pub fn read_tasks(path: &Path) -> Result<Option<Vec<Task>>, AppError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(AppError::io(path, err)),
    };

    let tasks =
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(path, err))?;
    Ok(Some(tasks))
}

/// Overwrites `path` with `tasks` as a JSON array.
pub fn write_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(parent, err))?;
    }

    let content =
        serde_json::to_string_pretty(tasks).map_err(|err| AppError::invalid_data(path, err))?;
    let created = !path.exists();
    std::fs::write(path, content).map_err(|err| AppError::io(path, err))?;

    if created {
        restrict_permissions(path);
    }

    Ok(())
}

/// Owner-only access for a freshly created store. The tasks are already on disk, so a
/// failure here is logged rather than reported.
#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(0o600);
    if let Err(err) = std::fs::set_permissions(path, permissions) {
        tracing::warn!(
            path = %path.display(),
            error = %err,
            "could not restrict task file permissions"
        );
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::{read_tasks, write_tasks};
    use crate::model::Task;
    use std::fs;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = read_tasks(&dir.path().join("absent.json")).unwrap();

        assert!(loaded.is_none());
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut done = Task::new("file taxes", Some("2025-04-15".into()), Some("High".into()));
        done.completed = true;
        let tasks = vec![Task::new("stretch", None, None), done];

        write_tasks(&path, &tasks).unwrap();
        let loaded = read_tasks(&path).unwrap().unwrap();

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn writes_a_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        write_tasks(&path, &[Task::new("one", None, None)]).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(
            raw,
            serde_json::json!([
                {
                    "description": "one",
                    "due_date": null,
                    "priority": "Medium",
                    "completed": false
                }
            ])
        );
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("tasks.json");

        write_tasks(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[cfg(unix)]
    #[test]
    fn restricts_permissions_of_new_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        write_tasks(&path, &[]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.json");
        fs::write(&path, "[]").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o664)).unwrap();

        write_tasks(&path, &[Task::new("shared chore", None, None)]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
        assert_eq!(read_tasks(&path).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn rejects_non_array_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("object.json");
        fs::write(&path, r#"{"tasks": []}"#).unwrap();

        let err = read_tasks(&path).unwrap_err();
        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn rejects_wrong_field_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad-completed.json");
        let content = r#"[
  {
    "description": "demo",
    "due_date": null,
    "priority": "Low",
    "completed": "yes"
  }
]"#;
        fs::write(&path, content).unwrap();

        let err = read_tasks(&path).unwrap_err();
        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn directory_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_tasks(dir.path()).unwrap_err();
        assert_eq!(err.code(), "io_error");
    }
}
