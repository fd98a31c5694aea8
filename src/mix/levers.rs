//! Scenario lever inputs and their validation at the engine boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound of the percentage levers and of every slider range.
pub const PERCENT_MAX: f64 = 100.0;

/// One of the five policy levers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lever {
    /// Share of the car fleet converted to electric (percent).
    Car,
    /// Share of the car fleet replaced by bicycles (percent).
    Bicycle,
    /// Rooftop solar households (percent proxy).
    Solar,
    /// Insulated homes (absolute count).
    Home,
    /// New wind farms (absolute count).
    Windfarm,
}

impl Lever {
    pub const ALL: [Lever; 5] = [
        Lever::Car,
        Lever::Bicycle,
        Lever::Solar,
        Lever::Home,
        Lever::Windfarm,
    ];

    /// Short name used by config files and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            Lever::Car => "car",
            Lever::Bicycle => "bicycle",
            Lever::Solar => "solar",
            Lever::Home => "home",
            Lever::Windfarm => "windfarm",
        }
    }

    /// Field name used by the slider form (`carNumber`, ...).
    pub fn form_name(self) -> &'static str {
        match self {
            Lever::Car => "carNumber",
            Lever::Bicycle => "bicycleNumber",
            Lever::Solar => "solarNumber",
            Lever::Home => "homeNumber",
            Lever::Windfarm => "windfarmNumber",
        }
    }

    /// Returns `true` for levers expressed as a percentage in `[0, 100]`.
    pub fn is_percentage(self) -> bool {
        matches!(self, Lever::Car | Lever::Bicycle | Lever::Solar)
    }

    /// Largest accepted value.
    pub fn max_value(self) -> f64 {
        if self.is_percentage() {
            PERCENT_MAX
        } else {
            f64::INFINITY
        }
    }

    fn expected_names() -> String {
        Lever::ALL
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Lever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lever {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Lever::ALL
            .into_iter()
            .find(|l| l.name() == s || l.form_name() == s)
            .ok_or_else(|| Error::UnknownLever {
                name: s.to_string(),
                expected: Lever::expected_names(),
            })
    }
}

/// How out-of-range lever values are handled before a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeverPolicy {
    /// Out-of-range values are an error.
    #[default]
    Reject,
    /// Finite out-of-range values are clamped into the lever's domain.
    Clamp,
}

/// Adoption levels for the five levers.
///
/// All zero is the reference year. The struct itself performs no checks;
/// call [`ScenarioInputs::validated`] before handing values to the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioInputs {
    /// Electric car adoption (percent of the fleet).
    #[serde(alias = "carNumber")]
    pub car: f64,
    /// Bicycle adoption (percent of the fleet, takes priority over cars).
    #[serde(alias = "bicycleNumber")]
    pub bicycle: f64,
    /// Rooftop solar households.
    #[serde(alias = "solarNumber")]
    pub solar: f64,
    /// Insulated homes.
    #[serde(alias = "homeNumber")]
    pub home: f64,
    /// New wind farms.
    #[serde(alias = "windfarmNumber")]
    pub windfarm: f64,
}

impl ScenarioInputs {
    /// Returns the value of `lever`.
    pub fn get(&self, lever: Lever) -> f64 {
        match lever {
            Lever::Car => self.car,
            Lever::Bicycle => self.bicycle,
            Lever::Solar => self.solar,
            Lever::Home => self.home,
            Lever::Windfarm => self.windfarm,
        }
    }

    /// Sets the value of `lever`.
    pub fn set(&mut self, lever: Lever, value: f64) {
        match lever {
            Lever::Car => self.car = value,
            Lever::Bicycle => self.bicycle = value,
            Lever::Solar => self.solar = value,
            Lever::Home => self.home = value,
            Lever::Windfarm => self.windfarm = value,
        }
    }

    /// Returns a copy with `lever` set to `value`.
    pub fn with(mut self, lever: Lever, value: f64) -> Self {
        self.set(lever, value);
        self
    }

    /// Parses `raw` as the value of the lever called `name`.
    ///
    /// Both the short (`car`) and form (`carNumber`) names are accepted.
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLever`] for an unrecognised name and
    /// [`Error::InvalidLever`] when `raw` is not a number.
    pub fn set_from_str(&mut self, name: &str, raw: &str) -> Result<()> {
        let lever: Lever = name.parse()?;
        let value = raw.trim().parse::<f64>().map_err(|_| Error::InvalidLever {
            lever,
            reason: format!("expected a number, got \"{raw}\""),
        })?;
        self.set(lever, value);
        Ok(())
    }

    /// Builds inputs from `(name, value)` string pairs, as submitted by a form.
    ///
    /// Levers that are not mentioned stay at zero.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`ScenarioInputs::set_from_str`].
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut inputs = Self::default();
        for (name, raw) in pairs {
            inputs.set_from_str(name, raw)?;
        }
        Ok(inputs)
    }

    /// Checks every lever against its domain and applies `policy`.
    ///
    /// NaN and infinite values are always rejected. Percentages must lie in
    /// `[0, 100]`; counts must be `>= 0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLever`] for the first offending lever.
    pub fn validated(&self, policy: LeverPolicy) -> Result<Self> {
        let mut checked = *self;
        for lever in Lever::ALL {
            checked.set(lever, check_lever(lever, self.get(lever), policy)?);
        }
        Ok(checked)
    }
}

fn check_lever(lever: Lever, value: f64, policy: LeverPolicy) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidLever {
            lever,
            reason: format!("expected a finite number, got {value}"),
        });
    }
    let max = lever.max_value();
    if (0.0..=max).contains(&value) {
        return Ok(value);
    }
    match policy {
        LeverPolicy::Clamp => Ok(value.clamp(0.0, max)),
        LeverPolicy::Reject if value < 0.0 => Err(Error::InvalidLever {
            lever,
            reason: format!("must be >= 0, got {value}"),
        }),
        LeverPolicy::Reject => Err(Error::InvalidLever {
            lever,
            reason: format!("must be <= {max}, got {value}"),
        }),
    }
}

impl fmt::Display for ScenarioInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "car={}% bicycle={}% solar={} home={} windfarm={}",
            self.car, self.bicycle, self.solar, self.home, self.windfarm
        )
    }
}
