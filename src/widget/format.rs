//! Human-readable numbers, rates and durations.
//!
//! Invalid inputs (NaN, infinite, negative) render as [`PLACEHOLDER`]
//! instead of failing. Integral values never show a decimal point.

/// Token shown for values that cannot be displayed.
pub const PLACEHOLDER: &str = "?";

const SI_PREFIXES: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];
const IEC_PREFIXES: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];
const MAX_PRECISION: usize = 9;

/// Unit prefix family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Decimal prefixes (k = 1000).
    Si,
    /// Binary prefixes (Ki = 1024).
    Iec,
}

impl Scale {
    const fn parts(self) -> (f64, &'static [&'static str; 9]) {
        match self {
            Self::Si => (1000.0, &SI_PREFIXES),
            Self::Iec => (1024.0, &IEC_PREFIXES),
        }
    }
}

/// Duration layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationFormat {
    /// Whole seconds under a minute (`5s`), clock layout above.
    #[default]
    Compact,
    /// Tenths of a second under a minute (`5.2s`), clock layout above.
    Precise,
    /// Always a clock (`0:05`, `1:05`, `1:01:05`).
    Long,
}

fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}

fn fixed(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.precision$}", precision = precision.min(MAX_PRECISION))
    }
}

/// Format a non-negative number, optionally scaled with unit prefixes.
pub fn format_number(value: f64, scale: Option<Scale>, precision: usize) -> String {
    if !value.is_finite() || value < 0.0 {
        return PLACEHOLDER.to_owned();
    }
    let Some(scale) = scale else {
        return fixed(round_to(value, precision), precision);
    };

    let (divisor, prefixes) = scale.parts();
    let last = prefixes.len() - 1;
    let mut index = 0;
    let mut scaled = value;
    while scaled >= divisor && index < last {
        scaled /= divisor;
        index += 1;
    }
    let mut rounded = round_to(scaled, precision);
    if rounded >= divisor && index < last {
        rounded = round_to(scaled / divisor, precision);
        index += 1;
    }
    format!("{}{}", fixed(rounded, precision), prefixes[index])
}

/// Format a throughput with SI prefixes and one decimal, e.g. `1.5k/s`.
pub fn format_rate(rate: f64) -> String {
    NumberFormat::default().rate(rate)
}

fn clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Format a duration given in seconds.
pub fn format_duration(secs: f64, format: DurationFormat) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return PLACEHOLDER.to_owned();
    }
    match format {
        DurationFormat::Compact if secs < 59.5 => format!("{secs:.0}s"),
        DurationFormat::Precise if secs < 59.95 => format!("{secs:.1}s"),
        _ => clock(secs.round() as u64),
    }
}

/// How counts and rates are displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Unit label appended to counts and rates.
    pub unit: String,
    /// Prefix scaling for counts; rates always scale, defaulting to SI.
    pub scale: Option<Scale>,
    /// Decimal places for non-integral values.
    pub precision: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            unit: String::new(),
            scale: None,
            precision: 1,
        }
    }
}

impl NumberFormat {
    /// Format a count, e.g. `1.2kB`.
    pub fn count(&self, value: f64) -> String {
        let number = format_number(value, self.scale, self.precision);
        format!("{number}{}", self.unit)
    }

    /// Format a rate, e.g. `1.5kB/s`.
    pub fn rate(&self, rate: f64) -> String {
        let number = format_number(rate, Some(self.scale.unwrap_or(Scale::Si)), self.precision);
        format!("{number}{}/s", self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_durations() {
        assert_eq!(format_duration(65.0, DurationFormat::Long), "1:05");
        assert_eq!(format_duration(3665.0, DurationFormat::Long), "1:01:05");
        assert_eq!(format_duration(5.0, DurationFormat::Long), "0:05");
    }

    #[test]
    fn test_short_durations() {
        assert_eq!(format_duration(5.4, DurationFormat::Compact), "5s");
        assert_eq!(format_duration(5.44, DurationFormat::Precise), "5.4s");
        assert_eq!(format_duration(59.7, DurationFormat::Compact), "1:00");
        assert_eq!(format_duration(125.0, DurationFormat::Precise), "2:05");
    }

    #[test]
    fn test_invalid_durations() {
        for bad in [f64::INFINITY, f64::NAN, -1.0] {
            assert_eq!(format_duration(bad, DurationFormat::Long), PLACEHOLDER);
        }
    }

    #[test]
    fn test_rates() {
        assert_eq!(format_rate(1500.0), "1.5k/s");
        assert_eq!(format_rate(2000.0), "2k/s");
        assert_eq!(format_rate(12.34), "12.3/s");
        assert_eq!(format_rate(0.0), "0/s");
        assert_eq!(format_rate(999_960.0), "1M/s");
        assert_eq!(format_rate(f64::INFINITY), "?/s");
    }

    #[test]
    fn test_unscaled_numbers() {
        assert_eq!(format_number(42.0, None, 2), "42");
        assert_eq!(format_number(1.256, None, 2), "1.26");
        assert_eq!(format_number(1500.0, None, 1), "1500");
        assert_eq!(format_number(-3.0, None, 1), PLACEHOLDER);
    }

    #[test]
    fn test_binary_scale() {
        assert_eq!(format_number(1024.0, Some(Scale::Iec), 1), "1Ki");
        assert_eq!(format_number(1536.0, Some(Scale::Iec), 2), "1.50Ki");
        assert_eq!(format_number(3.0 * 1024.0 * 1024.0, Some(Scale::Iec), 1), "3Mi");
    }

    #[test]
    fn test_units() {
        let bytes = NumberFormat {
            unit: "B".to_owned(),
            scale: Some(Scale::Si),
            precision: 1,
        };
        assert_eq!(bytes.count(1200.0), "1.2kB");
        assert_eq!(bytes.rate(1500.0), "1.5kB/s");
    }
}
