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

mod config;
mod real_main;
mod report;

pub use config::*;
pub use real_main::real_main;
pub use report::ConsoleReport;
