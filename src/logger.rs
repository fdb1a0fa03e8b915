use anyhow::Result;
use chrono::Local;
use colored::*;
use std::{fs::{self, File}, io::Write, path::PathBuf};

/// Streams solve steps to the console (optionally colored, optionally
/// pausing for Enter between steps) and mirrors each entry to a numbered
/// file under `dir`.
pub struct ConsoleLogger {
    dir: PathBuf,
    color: bool,
    step: bool,
    max_entries: usize,
    counter: usize,
}

impl ConsoleLogger {
    pub fn new(dir: impl Into<PathBuf>, color: bool, step: bool, max_entries: usize) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, color, step, max_entries, counter: 0 })
    }

    pub fn entries_written(&self) -> usize { self.counter }

    /// `max_entries == 0` means unlimited.
    pub fn log(&mut self, title: &str, details: &str) -> Result<()> {
        if self.max_entries != 0 && self.counter >= self.max_entries { return Ok(()); }
        self.counter += 1;
        let path = self.dir.join(format!("step({}).txt", self.counter));

        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut f = File::create(&path)?;
        writeln!(f, "[{}] {}\n\n{}", ts, title, details)?;

        if self.color {
            println!("{} {}\n{}", "➤".blue().bold(), title.bold(), details);
        } else {
            println!("➤ {}\n{}", title, details);
        }

        if self.step {
            print!("-- press Enter to continue --");
            use std::io::{self, Write as _};
            io::stdout().flush().ok();
            let mut s = String::new();
            io::stdin().read_line(&mut s).ok();
        }
        Ok(())
    }
}
