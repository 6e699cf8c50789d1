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

//! The copyright notice and the rules for putting it into a file's content.
//!
//! Everything here is pure string manipulation. Reading and writing files is
//! done by [`crate::inject`].

/// The notice prepended to source files, including its trailing blank line.
pub const HEADER: &str = "/**
 * COPYRIGHT NOTICE
 * Copyright (c) 2024 DJ Danny Hectic B / Hectic Radio
 * All rights reserved. Unauthorized copying, distribution, or use prohibited.
 * 
 * This is proprietary software. Reverse engineering, decompilation, or 
 * disassembly is strictly prohibited and may result in legal action.
 */

";

/// A file containing this anywhere is considered to already carry the header.
pub const MARKER: &str = "COPYRIGHT NOTICE";

const SHEBANG: &str = "#!";

pub fn has_header(content: &str) -> bool {
    content.contains(MARKER)
}

/// Whether the content starts with an interpreter directive line.
pub fn has_shebang(content: &str) -> bool {
    content.starts_with(SHEBANG)
}

/// Whitespace-only content never receives the header.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// What should be done with a file, judged from its content alone.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Verdict {
    /// Content is empty after trimming whitespace.
    Blank,
    /// The marker is already present.
    Present,
    /// The header needs to be inserted.
    Missing,
}

pub fn inspect(content: &str) -> Verdict {
    if is_blank(content) {
        Verdict::Blank
    } else if has_header(content) {
        Verdict::Present
    } else {
        Verdict::Missing
    }
}

/// Return the content with the header inserted, or `None` if the file should
/// be left alone.
///
/// An interpreter directive stays on the first line, followed by an empty
/// line and the trimmed header. Anything else gets the header prepended as
/// is.
pub fn insert_header(content: &str) -> Option<String> {
    if inspect(content) != Verdict::Missing {
        return None;
    }
    if !has_shebang(content) {
        let mut output = String::with_capacity(HEADER.len() + content.len());
        output.push_str(HEADER);
        output.push_str(content);
        return Some(output);
    }

    let header = HEADER.trim();
    let output = match content.split_once('\n') {
        Some((directive, rest)) => format!("{}\n\n{}\n{}", directive, header, rest),
        None => format!("{}\n\n{}", content, header),
    };
    Some(output)
}
