// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Client library for the Autoaddress Eircode lookup API.
//!
//! ```no_run
//! # async fn run() -> eircode_kit::Result<()> {
//! use eircode_kit::{EircodeApi, FindAddressRequest, Language};
//!
//! let api = EircodeApi::new("<developer key>")?;
//! let postcode = api.postcode_lookup("X33 2KPH").await?;
//! let matches = api
//!     .find_address(&FindAddressRequest::new("Dunboyne").language(Language::English))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod transaction_log;
pub mod version;

pub use api::types::{Country, Endpoint, FindAddressRequest, Language};
pub use api::{DEFAULT_BASE_URL, EircodeApi, EircodeApiBuilder};
pub use config::Config;
pub use error::{Error, Result};
pub use version::{VERSION, VERSION_NUMBER, VERSION_STRING};
