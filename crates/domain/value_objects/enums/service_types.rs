use std::fmt::Display;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Ocean,
    Air,
    Land,
    Express,
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let service_type = match self {
            ServiceType::Ocean => "ocean",
            ServiceType::Air => "air",
            ServiceType::Land => "land",
            ServiceType::Express => "express",
        };
        write!(f, "{}", service_type)
    }
}

impl ServiceType {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "ocean" => Ok(ServiceType::Ocean),
            "air" => Ok(ServiceType::Air),
            "land" => Ok(ServiceType::Land),
            "express" => Ok(ServiceType::Express),
            other => bail!("Unknown service type: {}", other),
        }
    }
}
