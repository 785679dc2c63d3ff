// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub(crate) const KEY_KEY: &str = "key";
pub(crate) const KEY_POSTCODE: &str = "postcode";
pub(crate) const KEY_ADDRESS: &str = "address";
pub(crate) const KEY_ADDRESS_ID: &str = "addressId";
pub(crate) const KEY_LIMIT: &str = "limit";
pub(crate) const KEY_LANGUAGE: &str = "language";
pub(crate) const KEY_COUNTRY: &str = "country";
pub(crate) const KEY_VANITY_MODE: &str = "vanityMode";
pub(crate) const KEY_ADDRESS_PROFILE_NAME: &str = "addressProfileName";
pub(crate) const KEY_ECAD_ID: &str = "ecadId";

/// Languages supported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    #[serde(rename = "ga", alias = "irish")]
    Irish,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Irish => "ga",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ga" | "irish" => Ok(Language::Irish),
            other => Err(format!("unsupported language '{}' (expected en or ga)", other)),
        }
    }
}

/// Countries supported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "gb", alias = "great-britain")]
    GreatBritain,
    #[default]
    #[serde(rename = "ie", alias = "ireland")]
    Ireland,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::GreatBritain => "gb",
            Country::Ireland => "ie",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gb" | "great-britain" | "greatbritain" => Ok(Country::GreatBritain),
            "ie" | "ireland" => Ok(Country::Ireland),
            other => Err(format!("unsupported country '{}' (expected gb or ie)", other)),
        }
    }
}

/// API endpoints, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    FindAddress,
    PostcodeLookup,
    VerifyAddress,
    GetEcadData,
}

impl Endpoint {
    /// Path segment as published by Autoaddress. Casing matters.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::FindAddress => "FindAddress",
            Endpoint::PostcodeLookup => "postcodelookup",
            Endpoint::VerifyAddress => "VerifyAddress",
            Endpoint::GetEcadData => "getEcadData",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Parameters for a find address call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindAddressRequest {
    /// Address or postcode to search for.
    pub address: String,
    /// Id of an address returned by an earlier ECAD lookup.
    pub address_id: Option<String>,
    /// Upper limit on results. The service defaults to 20.
    pub limit: Option<u32>,
    pub language: Option<Language>,
    pub country: Option<Country>,
    /// Return the vanity address if one exists.
    pub include_vanity: bool,
    /// Address profile used by the service to reformat the result.
    pub address_profile_name: Option<String>,
}

impl FindAddressRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn address_id(mut self, address_id: impl Into<String>) -> Self {
        self.address_id = Some(address_id.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    pub fn include_vanity(mut self, include_vanity: bool) -> Self {
        self.include_vanity = include_vanity;
        self
    }

    pub fn address_profile_name(mut self, name: impl Into<String>) -> Self {
        self.address_profile_name = Some(name.into());
        self
    }

    /// Query parameters for this request, excluding the developer key.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(KEY_ADDRESS, self.address.clone())];
        if let Some(address_id) = &self.address_id {
            pairs.push((KEY_ADDRESS_ID, address_id.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push((KEY_LIMIT, limit.to_string()));
        }
        if let Some(language) = self.language {
            pairs.push((KEY_LANGUAGE, language.as_str().to_string()));
        }
        if let Some(country) = self.country {
            pairs.push((KEY_COUNTRY, country.as_str().to_string()));
        }
        // vanityMode defaults to false on the service side
        if self.include_vanity {
            pairs.push((KEY_VANITY_MODE, "true".to_string()));
        }
        if let Some(name) = &self.address_profile_name {
            pairs.push((KEY_ADDRESS_PROFILE_NAME, name.clone()));
        }
        pairs
    }
}
