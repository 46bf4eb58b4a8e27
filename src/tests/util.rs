use crate::{Number, Unit, UnitProvider};

macro_rules! parse {
    ($src:expr) => {
        crate::Expression::parse($src, &crate::NullUnits).unwrap()
    };
    ($src:expr, $units:expr) => {
        crate::Expression::parse($src, $units).unwrap()
    };
}

macro_rules! parse_dec {
    ($src:expr) => {
        crate::Expression::parse_with(
            $src,
            crate::Settings {
                storage_mode: crate::StorageMode::Decimal,
                ..Default::default()
            },
            &crate::NullUnits,
        )
        .unwrap()
    };
}

macro_rules! exec {
    ($src:expr) => {
        parse!($src).execute(&crate::NullUnits).unwrap().unwrap()
    };
}

macro_rules! dbl {
    ($l:expr) => {
        crate::Number::Double($l as f64)
    };
}

macro_rules! dec {
    ($l:literal) => {
        crate::Number::Decimal(
            <rust_decimal::Decimal as core::str::FromStr>::from_str(stringify!($l)).unwrap(),
        )
    };
}

/// A small metric provider for the unit-aware tests. Knows a handful of
/// mass/length/time units, and `km/h` only as a composite spelling - `h`
/// on its own is unrecognised, which is exactly what the derived-unit
/// detection pass needs to exercise.
pub struct MetricUnits;

impl MetricUnits {
    fn factor(unit: &Unit) -> f64 {
        match unit.name() {
            "gram" => 0.001,
            "kilometre" => 1000.0,
            _ => 1.0,
        }
    }

    fn base_of(measure: &str) -> Option<&'static str> {
        Some(match measure {
            "mass" => "kg",
            "length" => "m",
            "time" => "s",
            "speed" => "km/h",
            _ => return None,
        })
    }
}

impl UnitProvider for MetricUnits {
    fn identify(&self, token: &str) -> Option<Unit> {
        Some(match token {
            "kg" => Unit::new("kilogram", "kg", "mass", true),
            "g" => Unit::new("gram", "g", "mass", false),
            "m" => Unit::new("metre", "m", "length", true),
            "km" => Unit::new("kilometre", "km", "length", false),
            "s" => Unit::new("second", "s", "time", true),
            "km/h" => Unit::new("kilometre per hour", "km/h", "speed", true),
            _ => return None,
        })
    }

    fn base_value(&self, value: Number, unit: &Unit) -> Option<(Number, Unit)> {
        let base = self.identify(Self::base_of(unit.measures())?)?;
        let factor = Number::from_f64(Self::factor(unit), value.mode()).ok()?;
        Some((value.checked_mul(factor).ok()?, base))
    }

    fn derived_value(&self, value: Number, unit: &Unit) -> Option<Number> {
        let factor = Number::from_f64(Self::factor(unit), value.mode()).ok()?;
        value.checked_div(factor).ok()
    }
}
