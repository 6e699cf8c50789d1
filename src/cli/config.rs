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

use crate::inject::InjectConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read and parse configuration from the file at the specified path.
///
/// `print_warnings`: Print warnings to stderr directly instead of go through
/// the logger.
pub fn load_config_from_path(p: &Path, print_warnings: bool) -> anyhow::Result<Config> {
    let file = OpenOptions::new()
        .read(true)
        .open(p)
        .context("failed to open config file")?;
    let mut config = load_config_from_file(&file, print_warnings)?;
    config.general.config_file_path = Some(p.into());
    Ok(config)
}

/// Read and parse configuration from file.
fn load_config_from_file(mut file: &File, print_warnings: bool) -> anyhow::Result<Config> {
    let mut file_content = String::new();
    file.read_to_string(&mut file_content)
        .context("failed to read config file")?;
    let config: Config = toml::from_str(&file_content).context("failed to parse config file")?;

    if let Some(ref extensions) = config.inject.extensions {
        if extensions.iter().all(|e| e.trim().trim_start_matches('.').is_empty()) {
            if print_warnings {
                eprintln!("[WARN  add_copyright::cli::config] no extensions configured, no file will be processed");
            } else {
                warn!("no extensions configured, no file will be processed");
            }
        }
    }

    Ok(config)
}

#[derive(Debug, Eq, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub inject: InjectSection,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct GeneralConfig {
    pub log: Option<String>,

    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

impl Eq for GeneralConfig {}

impl PartialEq<GeneralConfig> for GeneralConfig {
    /// config_file_path is ignored in comparison.
    fn eq(&self, other: &GeneralConfig) -> bool {
        self.log == other.log
    }
}

#[derive(Debug, Eq, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct InjectSection {
    /// Where to start walking. Relative to the config file's directory.
    pub root: Option<PathBuf>,

    /// Qualifying file suffixes.
    #[serde(alias = "Extension", default, with = "string_or_vec")]
    pub extensions: Option<Vec<String>>,

    /// Directory names that are never descended into.
    #[serde(alias = "ExcludeDirs", alias = "Exclude", default, with = "string_or_vec")]
    pub excluded_dirs: Option<Vec<String>>,
}

impl Config {
    /// Root directory, resolved against the config file location.
    pub fn root(&self) -> Option<PathBuf> {
        let root = self.inject.root.as_ref()?;
        if root.is_relative() {
            if let Some(dir) = self
                .general
                .config_file_path
                .as_deref()
                .and_then(Path::parent)
            {
                return Some(dir.join(root));
            }
        }
        Some(root.clone())
    }

    /// Settings from this file on top of the built-in defaults.
    pub fn inject_config(&self) -> InjectConfig {
        let mut c = InjectConfig::new(self.root().unwrap_or_else(|| PathBuf::from(".")));
        if let Some(ref extensions) = self.inject.extensions {
            c = c.with_extensions(extensions);
        }
        if let Some(ref dirs) = self.inject.excluded_dirs {
            c = c.with_excluded_dirs(dirs.iter().cloned());
        }
        c
    }
}

mod string_or_vec {
    use serde::{Deserializer, Serializer};
    use std::borrow::Cow;

    pub fn serialize<S: Serializer>(t: &Option<Vec<String>>, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        match t {
            None => s.serialize_none(),
            Some(t) => {
                let mut seq = s.serialize_seq(t.len().into())?;
                for v in t {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        use serde::de::{Error, SeqAccess, Visitor};
        use std::fmt;

        struct StringOrVecVisitor;

        impl<'de> Visitor<'de> for StringOrVecVisitor {
            type Value = Vec<String>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "a string or an array of strings")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(vec![v.into()])
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, <A as SeqAccess<'de>>::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut result = Vec::new();
                while let Some(v) = seq.next_element()? {
                    let v: Cow<'_, str> = v;
                    result.push(v.into_owned());
                }
                Ok(result)
            }
        }

        d.deserialize_any(StringOrVecVisitor).map(Some)
    }
}
