//! Numeric fields that the web client sends either as JSON numbers or as
//! numeric strings (form inputs). Anything else is rejected at the boundary.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    fn into_i64(self) -> Result<i64, String> {
        match self {
            Numeric::Int(v) => Ok(v),
            Numeric::Float(v) if v.fract() == 0.0 => Ok(v as i64),
            Numeric::Float(v) => Err(format!("expected an integer, got {v}")),
            Numeric::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("expected an integer, got \"{s}\"")),
        }
    }

    fn into_f64(self) -> Result<f64, String> {
        let v = match self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
            Numeric::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("expected a number, got \"{s}\""))?,
        };
        if v.is_finite() {
            Ok(v)
        } else {
            Err(format!("expected a finite number, got {v}"))
        }
    }
}

fn narrow(v: i64) -> Result<i32, String> {
    i32::try_from(v).map_err(|_| format!("integer {v} out of range"))
}

pub fn i32<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Numeric::deserialize(d)?
        .into_i64()
        .and_then(narrow)
        .map_err(D::Error::custom)
}

pub fn opt_i32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    match Option::<Numeric>::deserialize(d)? {
        None => Ok(None),
        Some(n) => n.into_i64().and_then(narrow).map(Some).map_err(D::Error::custom),
    }
}

pub fn f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Numeric::deserialize(d)?.into_f64().map_err(D::Error::custom)
}

pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<Numeric>::deserialize(d)? {
        None => Ok(None),
        Some(n) => n.into_f64().map(Some).map_err(D::Error::custom),
    }
}
