/// The split of the fuel burned in a flight between sustainable aviation fuel (SAF)
/// and Jet A-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelMix {
    pub saf: f64,
    pub jet_a1: f64,
}

/// An advisory issue with the user's input. It is reported to the user but
/// does not stop the estimate from being computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationWarning {
    /// SAF and Jet A-1 percentages add up to more than 100%
    PercentageSumExceeded { saf: f64, jet_a1: f64 },
}

impl std::error::Error for ValidationWarning {}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PercentageSumExceeded { .. } => f.write_str(
                "The sum of SAF Percentage and Jet A-1 Percentage should not exceed 100%. Please adjust your inputs.",
            ),
        }
    }
}

/// The result of [`normalize`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    /// the mix to encode in the feature vector
    pub mix: FuelMix,
    pub warning: Option<ValidationWarning>,
}

/// Converts the SAF and Jet A-1 percentages (each in `[0, 100]`) into fractions that sum to 1.
/// * when both are zero, both fractions are zero
/// * when they sum to more than 100, a [`ValidationWarning`] is returned and the raw
///   percentages are passed through un-normalized
/// # Implementation
/// Negative values are not clamped; callers are expected to pass non-negative values.
pub fn normalize(saf: f64, jet_a1: f64) -> Normalized {
    let total = saf + jet_a1;
    if total > 100.0 {
        let warning = ValidationWarning::PercentageSumExceeded { saf, jet_a1 };
        log::warn!("SAF {saf}% + Jet A-1 {jet_a1}% = {total}% - {warning}");
        return Normalized {
            mix: FuelMix { saf, jet_a1 },
            warning: Some(warning),
        };
    }

    let mix = if total > 0.0 {
        FuelMix {
            saf: saf / total,
            jet_a1: jet_a1 / total,
        }
    } else {
        FuelMix {
            saf: 0.0,
            jet_a1: 0.0,
        }
    };
    Normalized { mix, warning: None }
}
