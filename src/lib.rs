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

//! Prepend a copyright notice to source files that lack one.
//!
//! [`inject::traverse`] walks a tree and rewrites qualifying files,
//! [`inject::verify`] only reports them. The notice itself and the rules for
//! inserting it live in [`header`].

#[macro_use]
extern crate log;

pub mod cli;
pub mod header;
pub mod inject;
