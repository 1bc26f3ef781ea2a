use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Error, Result};

/// Where the engine's local REST server is listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
}

impl Endpoint {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }
}

#[derive(Debug, Deserialize)]
struct CoreProps {
    #[serde(default)]
    address: Option<String>,
}

/// Read the engine's `coreProps.json`. Every failure here is fatal at startup.
pub fn discover_endpoint(path: &Path) -> Result<Endpoint> {
    if !path.exists() {
        return Err(Error::Discovery(format!(
            "coreProps.json not found at {}. Please verify SteelSeries GG installation path.",
            path.display()
        )));
    }
    let raw = fs::read_to_string(path)?;
    let props: CoreProps = serde_json::from_str(&raw)
        .map_err(|e| Error::Discovery(format!("Failed to parse coreProps.json: {e}")))?;
    match props.address.map(|a| a.trim().to_string()) {
        Some(address) if !address.is_empty() => Ok(Endpoint { address }),
        _ => Err(Error::Discovery(
            "Could not find 'address' field in coreProps.json".into(),
        )),
    }
}
