// Copyright 2022 Yin Guanhao <sopium@mysterious.site>

// This file is part of add-copyright.

// add-copyright is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// add-copyright is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with add-copyright.  If not, see <https://www.gnu.org/licenses/>.

use crate::inject::{Outcome, Report, Summary};
use ansi_term::{Color, Style};
use std::io::{self, Write};
use std::path::Path;

/// Prints one line per added, missing or failed file. Skipped files are not
/// printed.
pub struct ConsoleReport<O, E> {
    out: O,
    err: E,
    green: Style,
    yellow: Style,
    red_bold: Style,
    bold: Style,
}

impl ConsoleReport<io::Stdout, io::Stderr> {
    /// Report to stdout and stderr, colored if stdout is a terminal.
    pub fn stdio() -> Self {
        let is_tty = atty::is(atty::Stream::Stdout);
        ConsoleReport::new(io::stdout(), io::stderr(), is_tty)
    }
}

impl<O: Write, E: Write> ConsoleReport<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        macro_rules! if_tty {
            ($s:expr) => {
                if color {
                    $s
                } else {
                    Style::new()
                }
            };
        }

        ConsoleReport {
            out,
            err,
            green: if_tty!(Color::Green.normal()),
            yellow: if_tty!(Color::Yellow.normal()),
            red_bold: if_tty!(Color::Red.bold()),
            bold: if_tty!(Style::new().bold()),
        }
    }

    pub fn start(&mut self, verb: &str, root: &Path) {
        let _ = writeln!(
            self.out,
            "{} {}",
            self.bold.paint(verb),
            root.display()
        );
    }

    pub fn finish(&mut self, summary: &Summary) {
        let _ = writeln!(self.out, "{}: {}", self.bold.paint("Done"), summary);
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

// Write errors (e.g. a closed pipe) are ignored, a console line is not worth
// aborting the run over.
impl<O: Write, E: Write> Report for ConsoleReport<O, E> {
    fn outcome(&mut self, path: &Path, outcome: Outcome) {
        let _ = match outcome {
            Outcome::Added => writeln!(
                self.out,
                "{} {}",
                self.green.paint("Added header to"),
                path.display()
            ),
            Outcome::Missing => writeln!(
                self.out,
                "{} {}",
                self.yellow.paint("Missing header in"),
                path.display()
            ),
            Outcome::AlreadyPresent | Outcome::Empty => Ok(()),
        };
    }

    fn failed(&mut self, path: &Path, error: &anyhow::Error) {
        let _ = writeln!(
            self.err,
            "{} {}: {:#}",
            self.red_bold.paint("Error processing"),
            path.display(),
            error
        );
    }
}
