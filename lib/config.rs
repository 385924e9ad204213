//! Run parameters, loadable from YAML.
//!
//! ```yaml
//! kappa: 5.0
//! sigma: 5.0
//! L: 100.0
//! x0: -33.333
//! tmax: 40.0
//! Nx: 400
//! Nt: 10000
//! potential:
//!   kind: tunneling
//!   x1: 25.0
//!   width: 1.0
//!   amplitude: 10.0
//! extra_packets:
//!   - center: 33.333
//!     wavenumber: -5.0
//!     width: 4.0
//! ```
//!
//! The potential `kind` is kept as a plain string here and only checked when a
//! [`Simulation`][crate::sim::Simulation] is built from the parameters.

use std::{ fs, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ ConfigError, UnsupportedPotentialKind },
    potential::{ Potential, PotentialKind, PotentialParams },
};

pub type ConfigResult<T> = Result<T, ConfigError>;

fn def_tmax() -> f64 { 10.0 }

/// Physical and numerical parameters for a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Central wavenumber of the initial packet.
    pub kappa: f64,
    /// Width of the initial packet.
    pub sigma: f64,
    /// Domain length; space covers `[-L/2, L/2]`.
    pub L: f64,
    /// Center of the initial packet.
    pub x0: f64,
    /// Simulation horizon.
    #[serde(default = "def_tmax")]
    pub tmax: f64,
    /// Number of spatial points.
    pub Nx: usize,
    /// Number of time points.
    pub Nt: usize,
    #[serde(default)]
    pub potential: PotentialConfig,
    /// Additional normalized packets summed into the initial state.
    #[serde(default)]
    pub extra_packets: Vec<PacketConfig>,
}

impl Params {
    /// Parameters for a single packet in an infinite square well.
    pub fn new(kappa: f64, sigma: f64, L: f64, x0: f64, tmax: f64, Nx: usize, Nt: usize)
        -> Self
    {
        Self {
            kappa,
            sigma,
            L,
            x0,
            tmax,
            Nx,
            Nt,
            potential: PotentialConfig::default(),
            extra_packets: Vec::new(),
        }
    }

    /// Replace the potential with a named kind, using default variant
    /// parameters.
    pub fn with_potential(mut self, kind: &str) -> Self {
        self.potential = PotentialConfig::named(kind);
        self
    }

    /// Add another packet to the initial state.
    pub fn with_packet(mut self, center: f64, wavenumber: f64, width: f64) -> Self {
        self.extra_packets.push(PacketConfig { center, wavenumber, width });
        self
    }

    /// Two counter-propagating packets in an infinite square well.
    pub fn double_packet() -> Self {
        let L = 100.0;
        let kappa = 500.0 / L;
        let sigma = L / 20.0;
        Self::new(kappa, sigma, L, -L / 3.0, 40.0, 4 * L as usize, 10000)
            .with_packet(L / 3.0, -kappa, 0.8 * sigma)
    }

    /// A single packet incident on a rectangular barrier.
    pub fn tunneling() -> Self {
        let L = 100.0;
        Self::new(500.0 / L, L / 20.0, L, -L / 3.0, 100.0, 4 * L as usize, 10000)
            .with_potential("tunneling")
    }

    /// Parse parameters from a YAML string.
    pub fn from_yaml_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Read parameters from a YAML file.
    pub fn from_yaml_file<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let file = fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Named potential with optional variant parameters.
///
/// Omitted parameters take the defaults of [`PotentialParams::for_length`].
/// Values are range-checked by [`Potential::check`] when a
/// [`Simulation`][crate::sim::Simulation] is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PotentialConfig {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
}

impl Default for PotentialConfig {
    fn default() -> Self { Self::named("isw") }
}

impl PotentialConfig {
    /// A potential of the given kind with all-default parameters.
    pub fn named(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            wall: None,
            x1: None,
            width: None,
            amplitude: None,
        }
    }

    /// Resolve into a concrete potential for a domain of length `L`.
    ///
    /// Fails if `kind` does not name a built-in potential.
    pub fn resolve(&self, L: f64) -> Result<Potential, UnsupportedPotentialKind> {
        let kind: PotentialKind = self.kind.parse()?;
        let def = PotentialParams::for_length(L);
        let params = PotentialParams {
            wall: self.wall.unwrap_or(def.wall),
            x1: self.x1.unwrap_or(def.x1),
            width: self.width.unwrap_or(def.width),
            amplitude: self.amplitude.unwrap_or(def.amplitude),
        };
        Ok(params.resolve(kind))
    }
}

/// An extra Gaussian packet.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PacketConfig {
    pub center: f64,
    pub wavenumber: f64,
    pub width: f64,
}
