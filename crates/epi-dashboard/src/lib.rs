//! epidash - tuberculosis case dashboard
//!
//! Wires configuration, data loading and the statistics transform into five
//! pages behind a menu:
//!
//! ```text
//! DashboardConfig ─→ DataLoader (SheetCache) ─→ Dataset
//!                                                  │
//! UiState (selected page, region filter) ─→ build_page ─→ PageView ─→ render
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use epi_dashboard::{build_page, render, DashboardConfig, DataLoader, OutputFormat, Page, UiState};
//!
//! let config = DashboardConfig::load("epidash.toml")?;
//! let data = DataLoader::new(&config).load(&config)?;
//! let state = UiState::new(Page::CaseTrend).with_region("Kota Depok");
//! let view = build_page(&state, &data, &config)?;
//! println!("{}", render(&view, &state, OutputFormat::Text)?);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod pages;
pub mod render;
pub mod state;

pub use config::{AboutConfig, DashboardConfig, DataConfig, DisplayConfig, TrendConfig};
pub use dataset::{DataLoader, Dataset};
pub use error::{DashboardError, DashboardResult};
pub use pages::{build_page, PageView};
pub use render::{render, render_menu, OutputFormat};
pub use state::{Page, UiState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
