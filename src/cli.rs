#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::backdrop::Variant;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EffectArg {
    Hail,
    Rain,
    Snowfall,
}

impl From<EffectArg> for Variant {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::Hail => Variant::Hail,
            EffectArg::Rain => Variant::Rain,
            EffectArg::Snowfall => Variant::Snowfall,
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "orderdesk",
    version,
    about = "Service orders over an animated terminal backdrop"
)]
pub struct Cli {
    /// Backdrop effect (default: last used, else hail)
    #[arg(long, value_enum)]
    pub effect: Option<EffectArg>,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Lower motion mode: fewer particles, one still frame
    #[arg(long)]
    pub reduced_motion: bool,

    /// Run without a drawable backdrop
    #[arg(long)]
    pub no_backdrop: bool,

    /// Pixels per terminal cell, horizontally
    #[arg(long, default_value_t = 8.0)]
    pub cell_width: f32,

    /// Pixels per terminal cell, vertically
    #[arg(long, default_value_t = 16.0)]
    pub cell_height: f32,

    /// Device pixel ratio of the backdrop raster
    #[arg(long, default_value_t = 1.0)]
    pub pixel_ratio: f32,

    /// Caller name on the local order ledger
    #[arg(long, default_value = "owner")]
    pub user: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.cell_width.is_finite() && self.cell_width > 0.0)
            || !(self.cell_height.is_finite() && self.cell_height > 0.0)
        {
            anyhow::bail!("--cell-width and --cell-height must be positive");
        }
        if self.user.trim().is_empty() {
            anyhow::bail!("--user must not be blank");
        }
        Ok(())
    }
}
