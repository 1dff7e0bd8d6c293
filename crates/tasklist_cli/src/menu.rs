use std::fmt::Display;
use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use std::path::PathBuf;
use tasklist_core::config::Palette;
use tasklist_core::error::AppError;
use tasklist_core::model::canonical_priority;
use tasklist_core::task_store::{LoadOutcome, TaskStore, TaskUpdate};

const OPTIONS: [&str; 8] = [
    "1. Add Task",
    "2. View Tasks",
    "3. Update Task",
    "4. Complete Task",
    "5. Delete Task",
    "6. Save Tasks",
    "7. Load Tasks",
    "8. Exit",
];

enum Flow {
    Continue,
    Exit,
}

/// The numbered menu session. Reads choices from `input`, writes results to `output` and
/// warnings to `errors`.
pub struct Menu<R, W, E> {
    input: R,
    output: W,
    errors: E,
    store: TaskStore,
    store_path: PathBuf,
    palette: Palette,
}

impl<R: BufRead, W: Write, E: Write> Menu<R, W, E> {
    pub fn new(input: R, output: W, errors: E, store_path: PathBuf, palette: Palette) -> Self {
        Self {
            input,
            output,
            errors,
            store: TaskStore::new(),
            store_path,
            palette,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Loads the store file, then serves menu choices until Exit or end of input.
    /// Returns the first unrecoverable error.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.load()?;

        loop {
            self.print_options()?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };

            let flow = match self.dispatch(choice.trim()) {
                Ok(flow) => flow,
                Err(err) if err.is_recoverable() => {
                    self.say(&err)?;
                    Flow::Continue
                }
                Err(err) => return Err(err),
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow, AppError> {
        match choice {
            "1" => self.add(),
            "2" => self.view(),
            "3" => self.update(),
            "4" => self.complete(),
            "5" => self.delete(),
            "6" => self.save(),
            "7" => self.load(),
            "8" => {
                self.say("Exiting the program.")?;
                Ok(Flow::Exit)
            }
            _ => {
                self.say("Invalid choice. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn add(&mut self) -> Result<Flow, AppError> {
        let Some(description) = self.prompt("Task description: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(due_date) = self.prompt("Due date (YYYY-MM-DD) or leave empty: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(priority) = self.prompt("Priority (High, Medium, Low): ")? else {
            return Ok(Flow::Exit);
        };

        let due_date = Some(due_date).filter(|value| !value.is_empty());
        let task = self
            .store
            .add(description, due_date, Some(canonical_priority(&priority)));
        let warning = (!task.has_well_formed_due_date()).then(|| {
            format!(
                "WARNING: due date '{}' is not in YYYY-MM-DD format",
                task.due_date.as_deref().unwrap_or_default()
            )
        });
        let message = format!("Task added: {}", task.description);

        if let Some(warning) = warning {
            writeln!(self.errors, "{warning}").map_err(AppError::console)?;
        }
        self.say(message)?;
        Ok(Flow::Continue)
    }

    fn view(&mut self) -> Result<Flow, AppError> {
        let lines: Vec<String> = self.store.view().collect();
        for line in lines {
            self.say(line)?;
        }
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> Result<Flow, AppError> {
        let Some(index) = self.prompt_index("Task index to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt("New description (leave empty to keep current): ")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(due_date) = self.prompt("New due date (leave empty to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(priority) = self.prompt("New priority (leave empty to keep current): ")? else {
            return Ok(Flow::Exit);
        };

        self.store.update(
            index,
            TaskUpdate {
                description: Some(description),
                due_date: Some(due_date),
                priority: Some(priority),
            },
        )?;
        self.say("Task updated.")?;
        Ok(Flow::Continue)
    }

    fn complete(&mut self) -> Result<Flow, AppError> {
        let Some(index) = self.prompt_index("Task index to complete: ")? else {
            return Ok(Flow::Exit);
        };

        self.store.complete(index)?;
        self.say("Task marked as completed.")?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow, AppError> {
        let Some(index) = self.prompt_index("Task index to delete: ")? else {
            return Ok(Flow::Exit);
        };

        let removed = self.store.delete(index)?;
        self.say(format!("Task removed: {}", removed.description))?;
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<Flow, AppError> {
        self.store.save(&self.store_path)?;
        let message = format!("Tasks saved to {}.", self.store_path.display());
        self.say(message)?;
        Ok(Flow::Continue)
    }

    fn load(&mut self) -> Result<Flow, AppError> {
        let message = match self.store.load(&self.store_path)? {
            LoadOutcome::Loaded(_) => format!("Tasks loaded from {}.", self.store_path.display()),
            LoadOutcome::NotFound => "No saved tasks found.".to_string(),
        };
        self.say(message)?;
        Ok(Flow::Continue)
    }

    fn print_options(&mut self) -> Result<(), AppError> {
        let header = self.palette.accentize("Options:");
        writeln!(self.output, "\n{header}").map_err(AppError::console)?;
        for option in OPTIONS {
            self.say(option)?;
        }
        Ok(())
    }

    /// Reads one line with the trailing newline removed. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        let label = self.palette.mutedize(label);
        write!(self.output, "{label}").map_err(AppError::console)?;
        self.output.flush().map_err(AppError::console)?;

        let mut line = String::new();
        let bytes = self.input.read_line(&mut line).map_err(AppError::console)?;
        if bytes == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Reads a 1-based index and returns it 0-based. Non-numeric input ends the session;
    /// numbers too large for `isize` saturate so the store reports them as out of range.
    fn prompt_index(&mut self, label: &str) -> Result<Option<isize>, AppError> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };

        let trimmed = raw.trim();
        let position = match trimmed.parse::<isize>() {
            Ok(position) => position,
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => isize::MAX,
                IntErrorKind::NegOverflow => isize::MIN,
                _ => {
                    return Err(AppError::invalid_input(format!("invalid task index '{trimmed}'")));
                }
            },
        };
        Ok(Some(position.saturating_sub(1)))
    }

    fn say<M: Display>(&mut self, message: M) -> Result<(), AppError> {
        writeln!(self.output, "{message}").map_err(AppError::console)
    }
}
