// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use caliper_core::schema::{InternalSchema, SiSchema, UnitSchema};
use color_eyre::Result;
use eyre::{eyre, WrapErr};
use serde_derive::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::PathBuf;

pub fn config_toml_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| eyre!("Could not find config directory"))?;
    path.push("caliper");
    path.push("config.toml");
    Ok(path)
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub caliper: Caliper,
    pub colors: Colors,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Caliper {
    /// Which prompt to render when run interactively.
    pub prompt: String,
    /// Which display schema results are rendered in.
    pub schema: Schema,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Standard SI units (meter, newton, pascal).
    Si,
    /// The internal base system (millimeter, kilogram, second).
    Internal,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    /// Whether support for colored output should be enabled.
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            caliper: Caliper::default(),
            colors: Colors::default(),
        }
    }
}

impl Default for Caliper {
    fn default() -> Caliper {
        Caliper {
            prompt: "> ".to_owned(),
            schema: Schema::Si,
        }
    }
}

impl Default for Colors {
    fn default() -> Colors {
        Colors { enabled: true }
    }
}

impl Config {
    pub fn schema(&self) -> &'static dyn UnitSchema {
        match self.caliper.schema {
            Schema::Si => &SiSchema,
            Schema::Internal => &InternalSchema,
        }
    }
}

/// Reads the config file, either from the given path or from the
/// platform config directory. A missing default config is not an
/// error; a missing explicitly-provided one is.
pub fn read_config(path: Option<&str>) -> Result<Config> {
    let path = match path {
        Some(path) => {
            let contents = read_to_string(path)
                .wrap_err(format!("Failed to read provided config file `{}`", path))?;
            return toml::from_str(&contents)
                .wrap_err(format!("While parsing config file `{}`", path));
        }
        None => config_toml_path()?,
    };
    match read_to_string(&path) {
        Ok(contents) => {
            toml::from_str(&contents).wrap_err(format!("While parsing {}", path.display()))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(err) => Err(err).wrap_err(format!("Failed to read {}", path.display())),
    }
}
