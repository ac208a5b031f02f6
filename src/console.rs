//! Command line surface of the viewer.
//!
//! [`PartialArgs`] is what `clap` parses; [`Args`] is the validated
//! configuration the rest of the program runs on.
use std::path::PathBuf;

use clap::Parser;

use crate::controls::DEFAULT_STEP;
use crate::error::{CausticError, CausticResult};
use crate::optics::refraction::FUSED_SILICA_ETA;
use crate::optics::{DisplayDomain, RefractionParams};

/// Validated command line configuration.
#[derive(Debug, PartialEq)]
pub struct Args {
    /// OBJ file with the lens geometry
    pub mesh_path: PathBuf,
    /// initial z of the receiver plane
    pub plane_depth: f64,
    pub refraction: RefractionParams,
    /// plane depth change per key press
    pub step: f64,
    pub domain: DisplayDomain,
    /// initial inner size of the window in physical pixels
    pub window_size: (u32, u32),
}

/// Visualize the caustic a lens surface casts onto a receiver plane.
///
/// Keys: W/Up moves the plane away from the lens, S/Down moves it closer,
/// Q prints the current distance, H toggles the overlay, Esc quits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// Path to an OBJ file containing the lens geometry
    mesh: PathBuf,

    /// Initial distance between the lens and the receiver plane
    /// (the plane is parallel to the x-y plane at z = DISTANCE)
    #[arg(allow_negative_numbers = true)]
    distance: f64,

    /// Ratio of the refractive index of the lens to that of the surrounding medium
    #[arg(long, default_value_t = FUSED_SILICA_ETA)]
    eta: f64,

    /// Distance the plane moves per key press
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: f64,

    /// Side length of the normalized display domain
    #[arg(long, default_value_t = 256.0)]
    domain: f64,

    /// Normalize the mesh normals instead of trusting them
    #[arg(long)]
    normalize_normals: bool,

    /// Initial window size as WIDTHxHEIGHT
    #[arg(long, default_value = "256x256")]
    window: String,
}

fn positive_finite(name: &str, value: f64) -> CausticResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CausticError::Arguments(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

fn parse_window_size(input: &str) -> CausticResult<(u32, u32)> {
    let invalid = || {
        CausticError::Arguments(format!(
            "invalid window size '{input}', expected WIDTHxHEIGHT"
        ))
    };
    let (w, h) = input.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

impl TryFrom<PartialArgs> for Args {
    type Error = CausticError;

    fn try_from(part_args: PartialArgs) -> CausticResult<Self> {
        if !part_args.distance.is_finite() {
            return Err(CausticError::Arguments(format!(
                "distance must be finite, got {}",
                part_args.distance
            )));
        }
        Ok(Self {
            mesh_path: part_args.mesh,
            plane_depth: part_args.distance,
            refraction: RefractionParams {
                eta: positive_finite("eta", part_args.eta)?,
                normalize_normals: part_args.normalize_normals,
                ..Default::default()
            },
            step: positive_finite("step", part_args.step)?,
            domain: DisplayDomain {
                size: positive_finite("domain", part_args.domain)?,
            },
            window_size: parse_window_size(&part_args.window)?,
        })
    }
}
