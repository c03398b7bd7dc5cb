use serde::Serialize;

/// Number of points in every generated series.
pub const SERIES_LEN: usize = 30;

const AMPLITUDE: f64 = 200.0;

/// Synthetic chart data derived from a single integer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub input: i64,
    pub x: Vec<i64>,
    pub y: Vec<i64>,
}

/// `y[i] = input + round(200 * sin(i² / 3))` for `i` in `0..30`.
///
/// The offset is added in integer space so large inputs keep full precision;
/// results saturate at the `i64` bounds.
pub fn generate(input: i64) -> Series {
    let x: Vec<i64> = (0..SERIES_LEN as i64).collect();
    let y = x.iter().map(|&i| input.saturating_add(offset(i))).collect();

    Series { input, x, y }
}

fn offset(i: i64) -> i64 {
    let i = i as f64;
    (AMPLITUDE * (i * i / 3.0).sin()).round() as i64
}
