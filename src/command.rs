//! Colon-command parsing.

use crate::error::EditorError;

/// A parsed `:` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// Empty input; does nothing.
    Nop,
    Quit { force: bool },
    Write { path: Option<String> },
    WriteQuit { force: bool },
    SetRelativeNumbers(bool),
    /// `rename` with its raw arguments; validated on execution.
    Rename(Vec<String>),
    DeleteFile,
    /// 1-based line number.
    GotoLine(usize),
}

impl ExCommand {
    pub fn parse(input: &str) -> Result<Self, EditorError> {
        let mut parts = input.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(ExCommand::Nop);
        };
        let args: Vec<&str> = parts.collect();
        let invalid = || EditorError::InvalidCommand(input.trim().to_string());

        let cmd = match word {
            "q" | "quit" => ExCommand::Quit { force: false },
            "q!" | "quit!" => ExCommand::Quit { force: true },
            "w" | "write" => ExCommand::Write {
                path: args.first().map(|p| p.to_string()),
            },
            "wq" => ExCommand::WriteQuit { force: false },
            "wq!" => ExCommand::WriteQuit { force: true },
            "set" => match args.as_slice() {
                ["relativenumber" | "rnu"] => ExCommand::SetRelativeNumbers(true),
                ["norelativenumber" | "nornu"] => ExCommand::SetRelativeNumbers(false),
                _ => return Err(invalid()),
            },
            "rename" => ExCommand::Rename(args.iter().map(|a| a.to_string()).collect()),
            "delete" | "del" => ExCommand::DeleteFile,
            other => match other.parse::<usize>() {
                Ok(line) if line > 0 => ExCommand::GotoLine(line),
                _ => return Err(invalid()),
            },
        };
        Ok(cmd)
    }
}
