//! climate-builder CLI.
//!
//! Collects climate inputs from flags (optionally seeded from a saved
//! snapshot), derives the profile, and prints or saves the results.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use climate_builder::biomes::Biome;
use climate_builder::climate::{
    ClimateConfig, ClimateError, ClimateInputs, Continentality, CurrentBias, DaylengthOverride,
    DiurnalSwing, Hemisphere, Humidity, LatBand, MoisturePattern, OceanCurrent, OceanDistance,
    OrographyPosition, PrevailingWind, RainShadow, Seasonality, Tilt, Topography,
    KNOWN_ATMO_QUIRKS, KNOWN_BUILDING_USES, KNOWN_EXTREMES,
};
use climate_builder::export::{
    export_snapshot_json, export_summary_txt, import_snapshot_json, Snapshot,
};
use climate_builder::{derive, derive_with, Generation};

/// Physics-lite climate builder: inputs to biome, palette, adaptations and prompt text.
#[derive(Parser)]
#[command(name = "climate-builder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every derivation stage.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a climate profile and print the prompt and syntax block.
    Generate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Start from the inputs of a saved JSON snapshot; flags override them.
        #[arg(long)]
        from_snapshot: Option<PathBuf>,

        /// Temperature lapse rate in °C per km of elevation.
        #[arg(long, default_value = "6.5")]
        lapse_rate: f64,

        /// Write the full JSON snapshot to this path.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the plain-text summary (prompt, blank line, syntax) to this path.
        #[arg(long)]
        txt: Option<PathBuf>,

        /// Also print the derived fields and adaptation pack as JSON.
        #[arg(long)]
        derived: bool,
    },

    /// Load a JSON snapshot and print its inputs.
    Import {
        /// Snapshot file.
        path: PathBuf,

        /// Re-run the derivation on the loaded inputs.
        #[arg(long)]
        rederive: bool,
    },

    /// List the accepted labels for every input field.
    Info,
}

/// Input overrides. Anything left unset keeps the default (or snapshot) value.
#[derive(Args, Default)]
struct InputArgs {
    /// World / region name.
    #[arg(long)]
    world_name: Option<String>,

    /// Absolute latitude, 0-85 degrees.
    #[arg(long)]
    latitude: Option<f64>,

    /// N or S.
    #[arg(long)]
    hemisphere: Option<Hemisphere>,

    /// Axial tilt severity: Mild, Earth-like or Strong.
    #[arg(long)]
    tilt: Option<Tilt>,

    /// Daylength bias: Lower, Higher, or none.
    #[arg(long)]
    daylength: Option<String>,

    /// Topography kind.
    #[arg(long)]
    topography: Option<Topography>,

    /// Mean elevation in metres, 0-5000.
    #[arg(long)]
    elevation: Option<u32>,

    /// Distance to ocean: Coastal, Near-coastal or Interior.
    #[arg(long)]
    ocean_distance: Option<OceanDistance>,

    /// Dominant ocean current: Warm, Cold or Neutral.
    #[arg(long)]
    ocean_current: Option<OceanCurrent>,

    /// Prevailing wind regime.
    #[arg(long)]
    wind: Option<PrevailingWind>,

    /// Position relative to a mountain range.
    #[arg(long)]
    orography: Option<OrographyPosition>,

    /// Atmospheric quirk (repeatable).
    #[arg(long = "quirk")]
    quirks: Vec<String>,

    /// Moisture source pattern.
    #[arg(long)]
    moisture: Option<MoisturePattern>,

    /// Annual precipitation in mm, 0-3000.
    #[arg(long)]
    precip: Option<u32>,

    /// Mean warm-season high, °C.
    #[arg(long, allow_negative_numbers = true)]
    warm_high: Option<f64>,

    /// Mean cool-season low, °C.
    #[arg(long, allow_negative_numbers = true)]
    cool_low: Option<f64>,

    /// Diurnal swing: Low, Medium or High.
    #[arg(long)]
    diurnal: Option<DiurnalSwing>,

    /// Extreme weather flag (repeatable; "None" clears).
    #[arg(long = "extreme")]
    extremes: Vec<String>,

    /// Building use focus (repeatable).
    #[arg(long = "building-use")]
    building_uses: Vec<String>,
}

impl InputArgs {
    /// Apply the overrides on top of `base`.
    fn apply(self, mut base: ClimateInputs) -> Result<ClimateInputs, ClimateError> {
        if let Some(name) = self.world_name {
            base.world_name = name.trim().to_string();
        }
        if let Some(v) = self.latitude {
            base.latitude_deg = v;
        }
        if let Some(v) = self.hemisphere {
            base.hemisphere = v;
        }
        if let Some(v) = self.tilt {
            base.tilt = v;
        }
        if let Some(v) = self.daylength {
            base.daylength_override = DaylengthOverride::parse_optional(&v)?;
        }
        if let Some(v) = self.topography {
            base.topography = v;
        }
        if let Some(v) = self.elevation {
            base.elevation_m = v;
        }
        if let Some(v) = self.ocean_distance {
            base.ocean_distance = v;
        }
        if let Some(v) = self.ocean_current {
            base.ocean_current = v;
        }
        if let Some(v) = self.wind {
            base.prevailing_wind = v;
        }
        if let Some(v) = self.orography {
            base.orography_position = v;
        }
        if !self.quirks.is_empty() {
            base.atmo_quirks = self.quirks;
        }
        if let Some(v) = self.moisture {
            base.moisture_pattern = v;
        }
        if let Some(v) = self.precip {
            base.precip_mm = v;
        }
        if let Some(v) = self.warm_high {
            base.t_warm_high_c = v;
        }
        if let Some(v) = self.cool_low {
            base.t_cool_low_c = v;
        }
        if let Some(v) = self.diurnal {
            base.diurnal_swing = v;
        }
        if !self.extremes.is_empty() {
            base.extremes = self.extremes;
        }
        if !self.building_uses.is_empty() {
            base.building_uses = self.building_uses;
        }
        Ok(base)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            inputs,
            from_snapshot,
            lapse_rate,
            json,
            txt,
            derived,
        } => run_generate(
            inputs,
            from_snapshot.as_deref(),
            lapse_rate,
            json.as_deref(),
            txt.as_deref(),
            derived,
        ),
        Commands::Import { path, rederive } => run_import(&path, rederive),
        Commands::Info => {
            run_info();
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose {
        "climate_builder=debug"
    } else {
        "climate_builder=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_generate(
    args: InputArgs,
    from_snapshot: Option<&Path>,
    lapse_rate: f64,
    json: Option<&Path>,
    txt: Option<&Path>,
    show_derived: bool,
) -> Result<()> {
    ensure!(
        lapse_rate.is_finite() && lapse_rate >= 0.0,
        "lapse rate must be a non-negative number of °C per km"
    );

    let base = match from_snapshot {
        Some(path) => {
            import_snapshot_json(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?
                .inputs
        }
        None => ClimateInputs::default(),
    };
    let inputs = args.apply(base)?;
    let config = ClimateConfig {
        lapse_rate_c_per_km: lapse_rate,
    };

    let generation = derive_with(&inputs, &config).context("deriving climate profile")?;
    print_generation(&generation);

    if show_derived {
        print_derived(&generation)?;
    }

    if let Some(path) = json {
        let snapshot = Snapshot::from_generation(&generation, Utc::now());
        export_snapshot_json(&snapshot, path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        println!("\nSnapshot written to {}", path.display());
    }
    if let Some(path) = txt {
        export_summary_txt(&generation, path)
            .with_context(|| format!("writing summary {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn print_generation(generation: &Generation) {
    println!("Climate Prompt");
    println!("==============");
    println!("{}", generation.prompt);
    println!();
    println!("Climate Syntax");
    println!("==============");
    println!("{}", generation.syntax);
}

fn print_derived(generation: &Generation) -> Result<()> {
    let biome: Biome = generation.derived.biome;
    println!();
    println!("Derived Overview");
    println!("================");
    if let Some(code) = biome.koppen() {
        println!("Köppen hint: {code}");
    }
    println!("{}", serde_json::to_string_pretty(&generation.derived)?);
    println!();
    println!("Adaptation Pack");
    println!("===============");
    println!("{}", serde_json::to_string_pretty(&generation.adaptations)?);
    Ok(())
}

fn run_import(path: &Path, rederive: bool) -> Result<()> {
    let snapshot = import_snapshot_json(path)
        .with_context(|| format!("loading snapshot {}", path.display()))?;

    println!("Snapshot: {}", path.display());
    println!("  App:       {}", snapshot.meta.app);
    println!("  Version:   {}", snapshot.meta.version);
    println!("  Timestamp: {}", snapshot.meta.timestamp.to_rfc3339());
    println!("  World:     {}", snapshot.inputs.world_label());
    println!();
    println!("Inputs");
    println!("======");
    println!("{}", serde_json::to_string_pretty(&snapshot.inputs)?);

    if rederive {
        let generation = derive(&snapshot.inputs).context("re-deriving climate profile")?;
        if generation.syntax != snapshot.syntax || generation.prompt != snapshot.prompt {
            warn!("stored texts differ from the re-derived profile");
        }
        println!();
        print_generation(&generation);
    }

    Ok(())
}

fn run_info() {
    println!("climate-builder - Input Reference");
    println!("=================================");
    println!();
    println!("Enumerated inputs:");
    println!("  hemisphere:          {}", Hemisphere::expected());
    println!("  tilt:                {}", Tilt::expected());
    println!("  daylength:           {} | none", DaylengthOverride::expected());
    println!("  topography:          {}", Topography::expected());
    println!("  ocean-distance:      {}", OceanDistance::expected());
    println!("  ocean-current:       {}", OceanCurrent::expected());
    println!("  wind:                {}", PrevailingWind::expected());
    println!("  orography:           {}", OrographyPosition::expected());
    println!("  moisture:            {}", MoisturePattern::expected());
    println!("  diurnal:             {}", DiurnalSwing::expected());
    println!();
    println!("Numeric inputs:");
    println!("  latitude:  0-85 degrees");
    println!("  elevation: 0-5000 m");
    println!("  precip:    0-3000 mm");
    println!();
    println!("Flag lists:");
    println!("  quirk:        {}", KNOWN_ATMO_QUIRKS.join(" | "));
    println!("  extreme:      {}", KNOWN_EXTREMES.join(" | "));
    println!("  building-use: {}", KNOWN_BUILDING_USES.join(" | "));
    println!();
    println!("Derived fields:");
    println!("  lat_band:       {}", LatBand::expected());
    println!("  seasonality:    {}", Seasonality::expected());
    println!("  continentality: {}", Continentality::expected());
    println!("  current_bias:   {}", CurrentBias::expected());
    println!("  rain_shadow:    {}", RainShadow::expected());
    println!("  humidity:       {}", Humidity::expected());
    println!("  biome:          {}", Biome::expected());
    println!();
    println!(
        "Default lapse rate: {} °C/km",
        ClimateConfig::default().lapse_rate_c_per_km
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "climate-builder",
            "generate",
            "--latitude",
            "18",
            "--topography",
            "Mountain range",
            "--orography",
            "Leeward",
            "--ocean-distance",
            "Interior (>200 km)",
            "--extreme",
            "Hail",
            "--cool-low",
            "-4",
        ])
        .unwrap();

        let Commands::Generate { inputs, .. } = cli.command else {
            panic!("expected generate");
        };
        let inputs = inputs.apply(ClimateInputs::default()).unwrap();
        assert_eq!(inputs.topography, Topography::MountainRange);
        assert_eq!(inputs.orography_position, OrographyPosition::Leeward);
        assert_eq!(inputs.extremes, vec!["Hail".to_string()]);
        assert_eq!(inputs.t_cool_low_c, -4.0);
    }

    #[test]
    fn cli_rejects_unknown_labels() {
        assert!(Cli::try_parse_from(["climate-builder", "generate", "--ocean-current", "Lukewarm"]).is_err());
    }

    #[test]
    fn bad_daylength_surfaces_invalid_input() {
        let args = InputArgs {
            daylength: Some("Sideways".to_string()),
            ..InputArgs::default()
        };
        assert!(matches!(
            args.apply(ClimateInputs::default()),
            Err(ClimateError::InvalidInput { field: "daylength_override", .. })
        ));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
