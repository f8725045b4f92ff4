/////////////////////////////////////////////////////////////////////////////////////
//
// Epitools - epidemic model utilities
//
// data_management module
//
// reads infection-profile parameters from the model's yaml file and writes
// derived daily profiles out as csv
//
////////////////////////////////////////////////////////////////////////////////////

use crate::infection::GammaParams;
use csv::WriterBuilder;
use serde::Serialize;
use std::error;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::prelude::Read;
use std::path::Path;
use yaml_rust::YamlLoader;

/// Parameters of the discretized infection profile.
#[derive(Debug, Clone)]
pub struct ProfileParms {
    pub period: usize,
    pub gamma: GammaParams,
}

/// Read the infection_profile section of a yaml parameter file:
///
/// infection_profile:
///   period: 14
///   gamma:
///     shape: 2.0
///     loc: 0.0
///     scale: 3.0
///
/// loc and scale may be omitted and default to 0 and 1.
pub fn load_profile_parms(path: &Path) -> Result<ProfileParms, ConfigError> {
    let mut parm_file = File::open(path)?;
    let mut parm_string = String::new();
    parm_file.read_to_string(&mut parm_string)?;

    // there can be multiple docs in a yaml file - only the first one interests us
    let docs = YamlLoader::load_from_str(&parm_string)?;
    let doc = match docs.first() {
        Some(doc) => doc,
        None => return Err(ConfigError::MissingKey("infection_profile")),
    };

    let key = "infection_profile";
    let period = doc[key]["period"]
        .as_i64()
        .ok_or(ConfigError::MissingKey("period"))? as usize;
    let shape = doc[key]["gamma"]["shape"]
        .as_f64()
        .ok_or(ConfigError::MissingKey("shape"))?;
    let loc = doc[key]["gamma"]["loc"].as_f64().unwrap_or(0.0);
    let scale = doc[key]["gamma"]["scale"].as_f64().unwrap_or(1.0);

    let gamma =
        GammaParams::new(shape, loc, scale).map_err(|e| ConfigError::BadParm(e.to_string()))?;
    Ok(ProfileParms { period, gamma })
}

/// One day of the discretized profile, ready for csv export.
#[derive(Debug, Copy, Clone, Serialize)]
pub struct ProfileRow {
    pub day: usize,
    pub mass: f64,
    pub infectivity: f64,
}

/// Zip the onset mass and the daily infectivity into export rows.
pub fn profile_rows(mass: &[f64], infectivity: &[f64]) -> Vec<ProfileRow> {
    mass.iter()
        .zip(infectivity)
        .enumerate()
        .map(|(day, (&mass, &infectivity))| ProfileRow {
            day,
            mass,
            infectivity,
        })
        .collect()
}

/// Write profile rows to a csv file, one line per day plus a header.
pub fn write_profile(path: &Path, rows: &[ProfileRow]) -> Result<(), ConfigError> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Yaml(yaml_rust::ScanError),
    Csv(csv::Error),
    MissingKey(&'static str),
    BadParm(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read parameter file - {}", e),
            ConfigError::Yaml(e) => write!(f, "could not parse parameter file - {}", e),
            ConfigError::Csv(e) => write!(f, "could not write profile file - {}", e),
            ConfigError::MissingKey(key) => write!(f, "parameter file is missing '{}'", key),
            ConfigError::BadParm(msg) => write!(f, "bad parameter value - {}", msg),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> ConfigError {
        ConfigError::Io(e)
    }
}

impl From<yaml_rust::ScanError> for ConfigError {
    fn from(e: yaml_rust::ScanError) -> ConfigError {
        ConfigError::Yaml(e)
    }
}

impl From<csv::Error> for ConfigError {
    fn from(e: csv::Error) -> ConfigError {
        ConfigError::Csv(e)
    }
}
