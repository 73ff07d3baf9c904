use crate::{
    OutputFormat,
    commands::{render, report},
    error::Result,
};
use datatable_core::DataTable;
use rusqlite::Connection;
use rustyline::{DefaultEditor, error::ReadlineError};

const PROMPT: &str = "datatable> ";
const CONTINUE_PROMPT: &str = "       ... ";

///
/// Shell
///
/// Line-oriented directive editor. Lines accumulate until a blank line,
/// which compiles the buffered directive and, with a database, runs it.
///

pub struct Shell {
    table: DataTable,
    conn: Option<Connection>,
    editor: DefaultEditor,
    buffer: Vec<String>,
}

impl Shell {
    pub fn new(table: DataTable, conn: Option<Connection>) -> Result<Self> {
        Ok(Self {
            table,
            conn,
            editor: DefaultEditor::new()?,
            buffer: Vec::new(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        println!("datatable shell v{}", env!("CARGO_PKG_VERSION"));
        println!("Enter directive lines; a blank line runs them. Ctrl-D exits.");

        loop {
            let prompt = if self.buffer.is_empty() {
                PROMPT
            } else {
                CONTINUE_PROMPT
            };

            match self.editor.readline(prompt) {
                Ok(line) if line.trim().is_empty() => {
                    if let Err(err) = self.flush() {
                        eprintln!("error: {err}");
                    }
                }
                Ok(line) => {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!(error = %err, "shell: history entry not recorded");
                    }
                    self.buffer.push(line);
                }
                Err(ReadlineError::Interrupted) => {
                    self.buffer.clear();
                    println!("directive discarded");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let lines = std::mem::take(&mut self.buffer);
        let spec = report(self.table.parse("", lines.iter().map(String::as_str)));
        println!("{}", self.table.compile(&spec, None).sql);

        if let Some(conn) = &self.conn {
            render(&self.table, conn, &spec, None, "", OutputFormat::Json)?;
        }

        Ok(())
    }
}
