//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::mix::assumptions::Assumptions;
use crate::mix::baseline::Baseline;
use crate::mix::engine::Engine;
use crate::mix::levers::{Lever, LeverPolicy, ScenarioInputs};
use crate::mix::types::{Category, CostMix, EmissionsMix, FleetEmissions, GenerationMix};

/// Top-level scenario configuration parsed from TOML.
///
/// All tables are optional. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::baseline`]
/// for the reference year with every lever at zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Lever values.
    #[serde(default)]
    pub levers: ScenarioInputs,
    /// Per-unit model assumptions.
    #[serde(default)]
    pub assumptions: Assumptions,
    /// Input validation policy.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Output options.
    #[serde(default)]
    pub output: OutputConfig,
    /// Replacement for the reference-year dataset.
    #[serde(default)]
    pub baseline: Option<BaselineConfig>,
}

/// Input validation policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// `"reject"` (default) or `"clamp"`.
    pub policy: LeverPolicy,
}

/// Output options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Emit inputs, delta and result as debug events.
    pub debug: bool,
}

/// Replacement baseline tables.
///
/// Tables that are left out keep their reference-year values. Capital cost
/// always starts at zero. Any source with positive emissions or cost must
/// also have positive production.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaselineConfig {
    /// Annual generation per source (GWh).
    pub production: GenerationMix,
    /// Annual generation emissions per source (kt CO2-e).
    pub emissions: EmissionsMix,
    /// Annual operating cost per source ($).
    pub cost: CostMix,
    /// Road fleet emissions (kt CO2-e).
    pub fleet_road: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        let reference = Baseline::reference();
        Self {
            production: reference.production,
            emissions: reference.emissions,
            cost: reference.cost,
            fleet_road: reference.fleet_emissions.value(Category::Road),
        }
    }
}

impl BaselineConfig {
    /// Builds a complete baseline from these tables.
    pub fn to_baseline(&self) -> Baseline {
        Baseline {
            production: self.production.clone(),
            emissions: self.emissions.clone(),
            cost: self.cost.clone(),
            capital_cost: Baseline::reference().capital_cost,
            fleet_emissions: FleetEmissions::from([(Category::Road, self.fleet_road)]),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"levers.car"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the reference year: every lever at zero, default assumptions.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the electric-fleet preset: most cars electric, some cycling.
    pub fn electric_fleet() -> Self {
        Self::with_levers(ScenarioInputs {
            car: 60.0,
            bicycle: 10.0,
            ..ScenarioInputs::default()
        })
    }

    /// Returns the renewables preset: full rooftop solar and three wind farms.
    pub fn renewables() -> Self {
        Self::with_levers(ScenarioInputs {
            solar: 100.0,
            windfarm: 3.0,
            ..ScenarioInputs::default()
        })
    }

    /// Returns the efficiency preset: insulation and cycling.
    pub fn efficiency() -> Self {
        Self::with_levers(ScenarioInputs {
            bicycle: 20.0,
            home: 100_000.0,
            ..ScenarioInputs::default()
        })
    }

    /// Returns the all-in preset: every lever pulled.
    pub fn all_in() -> Self {
        Self::with_levers(ScenarioInputs {
            car: 50.0,
            bicycle: 20.0,
            solar: 100.0,
            home: 100_000.0,
            windfarm: 5.0,
        })
    }

    fn with_levers(levers: ScenarioInputs) -> Self {
        Self {
            levers,
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &[
        "baseline",
        "electric_fleet",
        "renewables",
        "efficiency",
        "all_in",
    ];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "electric_fleet" => Ok(Self::electric_fleet()),
            "renewables" => Ok(Self::renewables()),
            "efficiency" => Ok(Self::efficiency()),
            "all_in" => Ok(Self::all_in()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Baseline the scenario projects from.
    pub fn baseline_data(&self) -> Baseline {
        self.baseline
            .as_ref()
            .map_or_else(Baseline::reference, BaselineConfig::to_baseline)
    }

    /// Builds an engine with this scenario's baseline, assumptions and policy.
    pub fn engine(&self) -> Engine<Baseline> {
        Engine::with_provider(self.baseline_data(), self.assumptions.clone())
            .with_policy(self.validation.policy)
            .with_debug(self.output.debug)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let policy = self.validation.policy;
        for lever in Lever::ALL {
            let single = ScenarioInputs::default().with(lever, self.levers.get(lever));
            if let Err(e) = single.validated(policy) {
                errors.push(ConfigError::new(format!("levers.{lever}"), e.to_string()));
            }
        }

        for (field, value) in self.assumptions.numeric_fields() {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(
                    format!("assumptions.{field}"),
                    format!("must be a finite number >= 0, got {value}"),
                ));
            }
        }

        if let Some(b) = &self.baseline {
            let tables = [
                ("production", &b.production),
                ("emissions", &b.emissions),
                ("cost", &b.cost),
            ];
            for (table, mix) in tables {
                for (category, value) in mix.iter() {
                    if !value.is_finite() || value < 0.0 {
                        errors.push(ConfigError::new(
                            format!("baseline.{table}.{category}"),
                            format!("must be a finite number >= 0, got {value}"),
                        ));
                    }
                    if !category.is_generation() {
                        errors.push(ConfigError::new(
                            format!("baseline.{table}.{category}"),
                            "not a generation source",
                        ));
                    }
                }
            }
            // per-unit rates divide by production, so every priced source needs output
            for (table, mix) in [("emissions", &b.emissions), ("cost", &b.cost)] {
                for (category, value) in mix.iter() {
                    if value > 0.0 && b.production.value(category) <= 0.0 {
                        errors.push(ConfigError::new(
                            format!("baseline.{table}.{category}"),
                            format!("is {value} but baseline.production.{category} is not > 0"),
                        ));
                    }
                }
            }
            if b.production.total() <= 0.0 {
                errors.push(ConfigError::new(
                    "baseline.production",
                    "total generation must be > 0",
                ));
            }
            if !b.fleet_road.is_finite() || b.fleet_road < 0.0 {
                errors.push(ConfigError::new(
                    "baseline.fleet_road",
                    format!("must be a finite number >= 0, got {}", b.fleet_road),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let e = ScenarioConfig::from_preset("nonexistent").unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert!(e.message.contains("renewables"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[levers]
carNumber = 40
bicycle = 10
solar = 80
home = 500
windfarm = 2

[assumptions]
fleet_size = 3000000.0
duplicate_wind_reduction = false

[validation]
policy = "clamp"

[output]
debug = true
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("valid TOML should parse");
        assert_eq!(cfg.levers.car, 40.0);
        assert_eq!(cfg.levers.home, 500.0);
        assert_eq!(cfg.assumptions.fleet_size, 3_000_000.0);
        assert!(!cfg.assumptions.duplicate_wind_reduction);
        // untouched assumptions keep defaults
        assert_eq!(cfg.assumptions.windfarm_gwh, 702.0);
        assert_eq!(cfg.validation.policy, LeverPolicy::Clamp);
        assert!(cfg.output.debug);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[levers]
car = 10
trams = 5
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ScenarioConfig::from_toml_str("[levers]\nsolar = 25\n").expect("should parse");
        assert_eq!(cfg.levers.solar, 25.0);
        assert_eq!(cfg.levers.car, 0.0);
        assert_eq!(cfg.assumptions, Assumptions::default());
        assert!(cfg.baseline.is_none());
    }

    #[test]
    fn validation_catches_out_of_range_lever() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.levers.car = 140.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "levers.car"));
    }

    #[test]
    fn clamp_policy_accepts_out_of_range_lever() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.levers.car = 140.0;
        cfg.validation.policy = LeverPolicy::Clamp;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validation_catches_negative_assumption() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.assumptions.ev_unit_cost = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "assumptions.ev_unit_cost"));
    }

    #[test]
    fn baseline_override_replaces_tables() {
        let toml = r#"
[baseline]
production = { Hydro = 96.0, Wind = 0.0, Gas = 32.0, Solar = 0.0 }
emissions = { Hydro = 0.0, Gas = 16.0 }
cost = { Hydro = 2000000.0, Gas = 4000000.0 }
fleet_road = 1000.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("should parse");
        let errors = cfg.validate();
        assert!(errors.is_empty(), "override should be valid: {errors:?}");
        let baseline = cfg.baseline_data();
        assert_eq!(baseline.production.total(), 128.0);
        assert_eq!(baseline.fleet_emissions.value(Category::Road), 1000.0);

        let engine = cfg.engine();
        let reference = engine
            .run(&ScenarioInputs::default())
            .expect("zero levers should run on the override");
        assert_eq!(reference.production, baseline.production);
        assert_eq!(reference.emissions, baseline.emissions);
        assert_eq!(reference.cost.value(Category::Gas), 4.0);
        assert_eq!(reference.fleet_emissions.value(Category::Road), 1000.0);

        let inputs = ScenarioInputs {
            car: 50.0,
            solar: 100.0,
            ..ScenarioInputs::default()
        };
        let result = engine.run(&inputs).expect("levers should run on the override");
        assert_eq!(result.fleet_emissions.value(Category::Road), 500.0);
        assert_eq!(result.production.value(Category::Solar), 0.526);
        assert!(result.emissions.value(Category::Gas) > 16.0);
    }

    #[test]
    fn baseline_override_rejects_inherited_priced_sources() {
        let toml = r#"
[baseline]
production = { Hydro = 100.0, Gas = 50.0 }
fleet_road = 1000.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("should parse");
        let errors = cfg.validate();
        // reference emissions and cost still price Geothermal, Wind and Coal
        for field in [
            "baseline.emissions.Geothermal",
            "baseline.emissions.Coal",
            "baseline.cost.Geothermal",
            "baseline.cost.Wind",
            "baseline.cost.Coal",
        ] {
            assert!(
                errors.iter().any(|e| e.field == field),
                "missing error for {field}: {errors:?}"
            );
        }
        assert!(!errors.iter().any(|e| e.field == "baseline.emissions.Gas"));
    }

    #[test]
    fn baseline_override_with_zero_generation_is_invalid() {
        let toml = r#"
[baseline]
production = { Hydro = 0.0 }
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("should parse");
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "baseline.production"));
    }

    #[test]
    fn baseline_override_rejects_synthetic_category() {
        let toml = r#"
[baseline]
cost = { Road = 5.0 }
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("should parse");
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "baseline.cost.Road"));
    }

    #[test]
    fn renewables_has_solar_and_wind() {
        let cfg = ScenarioConfig::renewables();
        assert_eq!(cfg.levers.solar, 100.0);
        assert!(cfg.levers.windfarm > 0.0);
        assert_eq!(cfg.levers.car, 0.0);
    }
}
