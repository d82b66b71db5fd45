//! Interactive prompt for run parameters.
//!
//! Every question accepts `q` or `quit` to abandon the run, in which case the
//! prompt returns `None`. Reaching end of input is treated the same way.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// Parameters already known before prompting, e.g. from command line flags.
/// Only the missing ones are asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GivenParameters {
    pub input: Option<PathBuf>,
    pub iterations: Option<usize>,
    pub rounds: Option<usize>,
}

/// Answers collected from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub input: PathBuf,
    pub iterations: usize,
    pub rounds: usize,
}

pub struct Prompt<R, W> {
    input: R,
    output: W,
    files: Vec<PathBuf>,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Create a prompt offering `files` as the input choices.
    pub fn new(input: R, output: W, files: Vec<PathBuf>) -> Self {
        Prompt {
            input,
            output,
            files,
        }
    }

    /// Ask in turn for every run parameter missing from `given`. Empty
    /// answers take the iteration and round counts of `defaults`.
    pub fn prompt_input(
        &mut self,
        given: GivenParameters,
        defaults: &Config,
    ) -> Result<Option<RunParameters>> {
        if let GivenParameters {
            input: Some(input),
            iterations: Some(iterations),
            rounds: Some(rounds),
        } = given
        {
            return Ok(Some(RunParameters {
                input,
                iterations,
                rounds,
            }));
        }

        self.print_quit_hint()?;

        let input = match given.input {
            Some(input) => input,
            None => match self.ask_file()? {
                Some(input) => input,
                None => return Ok(None),
            },
        };
        let iterations = match given.iterations {
            Some(iterations) => iterations,
            None => match self.ask_positive(
                &format!(
                    "Enter the number of iterations to run (default {}): ",
                    defaults.iterations
                ),
                defaults.iterations,
            )? {
                Some(iterations) => iterations,
                None => return Ok(None),
            },
        };
        let rounds = match given.rounds {
            Some(rounds) => rounds,
            None => match self.ask_positive(
                &format!(
                    "Enter the number of rounds to run (default {}): ",
                    defaults.rounds
                ),
                defaults.rounds,
            )? {
                Some(rounds) => rounds,
                None => return Ok(None),
            },
        };

        Ok(Some(RunParameters {
            input,
            iterations,
            rounds,
        }))
    }

    fn print_quit_hint(&mut self) -> Result<()> {
        writeln!(self.output, "Type 'q' or 'quit' anytime to quit.")?;
        Ok(())
    }

    /// Ask which input file to run until a listed number is given.
    fn ask_file(&mut self) -> Result<Option<PathBuf>> {
        loop {
            for (i, file) in self.files.iter().enumerate() {
                let label = file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.display().to_string());
                writeln!(self.output, "{}. {}", i + 1, label)?;
            }

            let Some(answer) = self.read_answer("Select input file to run: ")? else {
                return Ok(None);
            };

            match answer.parse::<usize>() {
                Ok(choice) if (1..=self.files.len()).contains(&choice) => {
                    return Ok(Some(self.files[choice - 1].clone()));
                }
                _ => {
                    writeln!(self.output, "Error, invalid file selection.")?;
                    writeln!(self.output)?;
                }
            }
        }
    }

    /// Ask for a positive integer; an empty answer takes `default`.
    fn ask_positive(&mut self, question: &str, default: usize) -> Result<Option<usize>> {
        loop {
            let Some(answer) = self.read_answer(question)? else {
                return Ok(None);
            };

            if answer.is_empty() {
                return Ok(Some(default));
            }

            match answer.parse::<usize>() {
                Ok(value) if value > 0 => return Ok(Some(value)),
                _ => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Error, '{}' must be a positive integer.", answer)?;
                }
            }
        }
    }

    /// Print `question` and read one trimmed answer. `None` means quit.
    fn read_answer(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if is_quit(answer) {
            return Ok(None);
        }
        Ok(Some(answer.to_string()))
    }
}

fn is_quit(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit")
}
