use anyhow::{anyhow, Context};
use serde::Deserialize;

/// A traffic authority publishing a DATEX II situation publication.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub url: String,
}

impl Region {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// DGT publications for Catalonia, the Basque Country and the rest of Spain.
pub fn default_regions() -> Vec<Region> {
    vec![
        Region::new(
            "Cataluña",
            "http://infocar.dgt.es/datex2/sct/SituationPublication/all/content.xml",
        ),
        Region::new(
            "País Vasco",
            "http://infocar.dgt.es/datex2/dt-gv/SituationPublication/all/content.xml",
        ),
        Region::new(
            "Resto España",
            "http://infocar.dgt.es/datex2/dgt/SituationPublication/all/content.xml",
        ),
    ]
}

/// Fetches the raw publication of a region.
pub trait RegionSource: Sync {
    fn fetch(&self, region: &Region) -> anyhow::Result<String>;
}

pub struct HttpRegionSource {
    client: reqwest::blocking::Client,
}

impl HttpRegionSource {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl RegionSource for HttpRegionSource {
    fn fetch(&self, region: &Region) -> anyhow::Result<String> {
        log::debug!("Downloading {}", region.url);
        let response = self
            .client
            .get(&region.url)
            .send()
            .with_context(|| format!("Requesting {}", region.url))?
            .error_for_status()?;
        response.text().or(Err(anyhow!("No response text")))
    }
}
