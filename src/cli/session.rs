//! Interactive session loop
//!
//! Reads one command per line, executes it against the task list, and
//! answers with one output block. Every parse or range error is reported and
//! the loop continues; only `bye` (or end of input) ends the session. The
//! list is flushed to the store after each successful mutation and never
//! after a failed one.

use std::io::{BufRead, Write};

use anyhow::Result;

use super::output::Output;
use crate::domain::{self, Command, ListError, ParseError, Task, TaskList};
use crate::storage::TaskStore;

/// Whether the loop keeps reading after a command
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One interactive session over abstract line-oriented I/O
pub struct Session<W: Write> {
    list: TaskList,
    store: TaskStore,
    output: Output<W>,
}

impl<W: Write> Session<W> {
    pub fn new(store: TaskStore, output: Output<W>) -> Self {
        Self {
            list: TaskList::new(),
            store,
            output,
        }
    }

    /// Runs the session to completion over the given input
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        self.greet()?;
        self.load()?;

        for line in input.lines() {
            let line = line?;
            if self.handle_line(&line)? == Flow::Exit {
                break;
            }
        }

        self.farewell()?;
        Ok(())
    }

    /// Loads persisted tasks, reporting every record that had to be skipped
    fn load(&mut self) -> Result<()> {
        let outcome = self.store.load()?;

        for skipped in &outcome.skipped {
            self.output.verbose(&format!(
                "skipped storage line {}: {}",
                skipped.line_number, skipped.content
            ));
            self.output.error(&format!(
                "Skipping corrupted record at line {}: {}",
                skipped.line_number, skipped.error
            ))?;
        }

        self.output
            .verbose(&format!("loaded {} task(s)", outcome.tasks.len()));
        self.list = TaskList::from_tasks(outcome.tasks);
        Ok(())
    }

    /// Parses and executes one input line
    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match domain::parse(line) {
            Ok(command) => self.execute(command),
            Err(error) => {
                self.report_parse_error(&error)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::List => self.show_list()?,
            Command::Todo { description } => self.add(Task::todo(description))?,
            Command::Deadline { description, by } => self.add(Task::deadline(description, by))?,
            Command::Event {
                description,
                from,
                to,
            } => self.add(Task::event(description, from, to))?,
            Command::Mark(index) => self.set_done(index, true)?,
            Command::Unmark(index) => self.set_done(index, false)?,
            Command::Delete(index) => self.delete(index)?,
            Command::Find { keyword } => self.find(&keyword)?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, task: Task) -> Result<()> {
        let count = self.list.add(task);
        self.flush();

        // The task just appended is the last one; borrow it back for echo.
        let task = &self.list.tasks()[count - 1];
        if self.output.is_json() {
            self.output.data(&serde_json::json!({
                "event": "added",
                "task": task,
                "count": count,
            }))?;
        } else {
            self.output.block(&[
                "Added this task:".to_string(),
                format!("  {}", task),
                format!("Now you have {} task(s) in the list.", count),
            ])?;
        }
        Ok(())
    }

    fn set_done(&mut self, index: usize, done: bool) -> Result<()> {
        let result = if done {
            self.list.mark_done(index)
        } else {
            self.list.unmark(index)
        };

        match result {
            Ok(task) => {
                let line = task.to_string();
                self.flush();
                if self.output.is_json() {
                    let task = &self.list.tasks()[index - 1];
                    let event = if done { "marked" } else { "unmarked" };
                    self.output.data(&serde_json::json!({
                        "event": event,
                        "index": index,
                        "task": task,
                    }))?;
                } else {
                    let heading = if done {
                        "Marked this task as done:"
                    } else {
                        "Marked this task as not done yet:"
                    };
                    self.output
                        .block(&[heading.to_string(), format!("  {}", line)])?;
                }
            }
            Err(error) => self.report_list_error(&error)?,
        }
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<()> {
        match self.list.delete(index) {
            Ok(task) => {
                self.flush();
                if self.output.is_json() {
                    self.output.data(&serde_json::json!({
                        "event": "deleted",
                        "task": &task,
                        "count": self.list.len(),
                    }))?;
                } else {
                    self.output.block(&[
                        "Removed this task:".to_string(),
                        format!("  {}", task),
                        format!("Now you have {} task(s) in the list.", self.list.len()),
                    ])?;
                }
            }
            Err(error) => self.report_list_error(&error)?,
        }
        Ok(())
    }

    fn show_list(&mut self) -> Result<()> {
        if self.output.is_json() {
            let tasks: Vec<_> = self
                .list
                .iter_numbered()
                .map(|(index, task)| {
                    serde_json::json!({
                        "index": index,
                        "task": task,
                    })
                })
                .collect();
            self.output.data(&serde_json::json!({
                "event": "list",
                "count": self.list.len(),
                "tasks": tasks,
            }))?;
            return Ok(());
        }

        if self.list.is_empty() {
            self.output.block(&["Your list is empty.".to_string()])?;
            return Ok(());
        }

        let mut lines = vec!["Here are the tasks in your list:".to_string()];
        for (index, task) in self.list.iter_numbered() {
            lines.push(format!("{}. {}", index, task));
        }
        self.output.block(&lines)?;
        Ok(())
    }

    fn find(&mut self, keyword: &str) -> Result<()> {
        let matches = self.list.find(keyword);

        if self.output.is_json() {
            let tasks: Vec<_> = matches
                .iter()
                .map(|(index, task)| {
                    serde_json::json!({
                        "index": index,
                        "task": task,
                    })
                })
                .collect();
            self.output.data(&serde_json::json!({
                "event": "find",
                "keyword": keyword,
                "matches": tasks,
            }))?;
            return Ok(());
        }

        if matches.is_empty() {
            self.output
                .block(&[format!("No tasks matching '{}' found.", keyword)])?;
            return Ok(());
        }

        let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
        for (index, task) in matches {
            lines.push(format!("{}. {}", index, task));
        }
        self.output.block(&lines)?;
        Ok(())
    }

    /// Persists the whole list; failures are reported but never fatal, the
    /// in-memory list stays authoritative for the rest of the session.
    fn flush(&mut self) {
        if let Err(e) = self.store.save(self.list.tasks()) {
            eprintln!("Warning: failed to save tasks: {:#}", e);
        }
    }

    fn report_parse_error(&mut self, error: &ParseError) -> Result<()> {
        self.output.error(&error.to_string())?;
        Ok(())
    }

    fn report_list_error(&mut self, error: &ListError) -> Result<()> {
        self.output.error(&error.to_string())?;
        Ok(())
    }

    fn greet(&mut self) -> Result<()> {
        if self.output.is_json() {
            self.output.data(&serde_json::json!({ "event": "greeting" }))?;
        } else {
            self.output.block(&[
                "Hello! This is taskline.".to_string(),
                "What can I do for you?".to_string(),
            ])?;
        }
        Ok(())
    }

    fn farewell(&mut self) -> Result<()> {
        if self.output.is_json() {
            self.output.data(&serde_json::json!({ "event": "farewell" }))?;
        } else {
            self.output
                .block(&["Bye. See you next time!".to_string()])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::cli::output::OutputFormat;

    /// Runs one scripted session and returns its stdout text
    fn run_session(dir: &TempDir, input: &str) -> String {
        run_session_with_format(dir, input, OutputFormat::Text)
    }

    fn run_session_with_format(dir: &TempDir, input: &str, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        {
            let store = TaskStore::new(dir.path().join("tasks.txt"));
            let output = Output::new(&mut buf, format, false, 20);
            let mut session = Session::new(store, output);
            session.run(Cursor::new(input.to_string())).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    fn stored(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("tasks.txt")).unwrap()
    }

    #[test]
    fn todo_is_added_listed_and_persisted() {
        let dir = TempDir::new().unwrap();
        let out = run_session(&dir, "todo buy milk\nlist\nbye\n");

        assert!(out.contains("Added this task:"));
        assert!(out.contains("1. [T][ ] buy milk"));
        assert!(out.contains("Now you have 1 task(s) in the list."));
        assert_eq!(stored(&dir), "[T][ ] buy milk\n");
    }

    #[test]
    fn marking_a_deadline_updates_the_stored_line() {
        let dir = TempDir::new().unwrap();
        run_session(&dir, "deadline submit report /by Friday\nmark 1\nbye\n");

        assert_eq!(stored(&dir), "[D][X] submit report (by: Friday)\n");
    }

    #[test]
    fn malformed_event_reports_invalid_format_and_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = run_session(&dir, "event trip /from Mon\nlist\nbye\n");

        assert!(out.contains("Invalid format. Use: event <description> /from <start> /to <end>"));
        assert!(out.contains("Your list is empty."));
        // No mutation succeeded, so no flush happened either.
        assert!(!dir.path().join("tasks.txt").exists());
    }

    #[test]
    fn delete_out_of_range_reports_and_does_not_flush() {
        let dir = TempDir::new().unwrap();
        run_session(&dir, "todo alpha\ntodo beta\nbye\n");
        let before = stored(&dir);

        let out = run_session(&dir, "delete 5\nbye\n");
        assert!(out.contains("No task at index 5: the list has 2 task(s)"));
        assert_eq!(stored(&dir), before);
    }

    #[test]
    fn delete_renumbers_later_tasks() {
        let dir = TempDir::new().unwrap();
        let out = run_session(&dir, "todo alpha\ntodo beta\ntodo gamma\ndelete 1\nlist\nbye\n");

        assert!(out.contains("Removed this task:"));
        assert!(out.contains("1. [T][ ] beta"));
        assert!(out.contains("2. [T][ ] gamma"));
        assert_eq!(stored(&dir), "[T][ ] beta\n[T][ ] gamma\n");
    }

    #[test]
    fn find_preserves_original_numbering() {
        let dir = TempDir::new().unwrap();
        let out = run_session(
            &dir,
            "todo read book\ntodo buy milk\ntodo return book\nfind book\nbye\n",
        );

        assert!(out.contains("Here are the matching tasks in your list:"));
        assert!(out.contains("1. [T][ ] read book"));
        assert!(out.contains("3. [T][ ] return book"));
        assert!(!out.contains("2. [T][ ] buy milk"));
    }

    #[test]
    fn unknown_command_is_reported_and_the_loop_continues() {
        let dir = TempDir::new().unwrap();
        let out = run_session(&dir, "meow\ntodo buy milk\nbye\n");

        assert!(out.contains("Unknown command"));
        assert!(out.contains("Added this task:"));
    }

    #[test]
    fn tasks_survive_across_sessions() {
        let dir = TempDir::new().unwrap();
        run_session(&dir, "todo buy milk\nbye\n");
        let out = run_session(&dir, "list\nbye\n");

        assert!(out.contains("1. [T][ ] buy milk"));
    }

    #[test]
    fn corrupted_records_are_reported_and_skipped_on_load() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tasks.txt"),
            "[T][ ] buy milk\ngarbage line\n[T][X] call home\n",
        )
        .unwrap();

        let out = run_session(&dir, "list\nbye\n");
        assert!(out.contains("Skipping corrupted record at line 2"));
        assert!(out.contains("1. [T][ ] buy milk"));
        assert!(out.contains("2. [T][X] call home"));
    }

    #[test]
    fn end_of_input_ends_the_session_like_bye() {
        let dir = TempDir::new().unwrap();
        let out = run_session(&dir, "todo buy milk\n");

        assert!(out.contains("Bye. See you next time!"));
    }

    #[test]
    fn json_mode_emits_one_object_per_command() {
        let dir = TempDir::new().unwrap();
        let out = run_session_with_format(&dir, "todo buy milk\nlist\nbye\n", OutputFormat::Json);

        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events[0]["event"], "greeting");
        assert_eq!(events[1]["event"], "added");
        assert_eq!(events[1]["task"]["description"], "buy milk");
        assert_eq!(events[1]["count"], 1);
        assert_eq!(events[2]["event"], "list");
        assert_eq!(events[2]["tasks"][0]["index"], 1);
        assert_eq!(events[3]["event"], "farewell");
    }

    #[test]
    fn idempotent_marking_through_the_session() {
        let dir = TempDir::new().unwrap();
        run_session(&dir, "todo buy milk\nmark 1\nmark 1\nbye\n");

        assert_eq!(stored(&dir), "[T][X] buy milk\n");
    }
}
