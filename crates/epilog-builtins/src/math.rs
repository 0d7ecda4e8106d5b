//! Math functions and list operators.

/// Is `name` a math function usable as `name(Args..., Result)`?
pub fn is_math(name: &str) -> bool {
    MATH.iter().any(|(n, _)| *n == name)
}

type MathFn = fn(&[f64]) -> f64;

fn arg(args: &[f64], i: usize) -> f64 {
    args.get(i).copied().unwrap_or(f64::NAN)
}

static MATH: &[(&str, MathFn)] = &[
    ("abs", |a| arg(a, 0).abs()),
    ("acos", |a| arg(a, 0).acos()),
    ("acosh", |a| arg(a, 0).acosh()),
    ("asin", |a| arg(a, 0).asin()),
    ("asinh", |a| arg(a, 0).asinh()),
    ("atan", |a| arg(a, 0).atan()),
    ("atanh", |a| arg(a, 0).atanh()),
    ("atan2", |a| arg(a, 0).atan2(arg(a, 1))),
    ("cbrt", |a| arg(a, 0).cbrt()),
    ("ceil", |a| arg(a, 0).ceil()),
    ("cos", |a| arg(a, 0).cos()),
    ("cosh", |a| arg(a, 0).cosh()),
    ("exp", |a| arg(a, 0).exp()),
    ("expm1", |a| arg(a, 0).exp_m1()),
    ("floor", |a| arg(a, 0).floor()),
    ("hypot", |a| a.iter().map(|x| x * x).sum::<f64>().sqrt()),
    ("log", |a| arg(a, 0).ln()),
    ("log1p", |a| arg(a, 0).ln_1p()),
    ("log2", |a| arg(a, 0).log2()),
    ("log10", |a| arg(a, 0).log10()),
    ("max", |a| a.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
    ("min", |a| a.iter().copied().fold(f64::INFINITY, f64::min)),
    ("pow", |a| arg(a, 0).powf(arg(a, 1))),
    ("random", |_| rand::random::<f64>()),
    ("round", |a| (arg(a, 0) + 0.5).floor()),
    ("sign", |a| sign(arg(a, 0))),
    ("sin", |a| arg(a, 0).sin()),
    ("sinh", |a| arg(a, 0).sinh()),
    ("sqrt", |a| arg(a, 0).sqrt()),
    ("tan", |a| arg(a, 0).tan()),
    ("tanh", |a| arg(a, 0).tanh()),
    ("trunc", |a| arg(a, 0).trunc()),
];

fn sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 {
        x
    } else {
        x.signum()
    }
}

/// Apply a math function; `None` for an unknown name.
pub fn apply_math(name: &str, args: &[f64]) -> Option<f64> {
    MATH.iter().find(|(n, _)| *n == name).map(|(_, f)| f(args))
}

/// Operators over a list of numbers, used as `name(List, Result)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOp {
    Maximum,
    Minimum,
    Range,
    Midrange,
    Sum,
    Median,
    Mean,
    Variance,
    Stddev,
}

impl ListOp {
    pub fn from_name(name: &str) -> Option<ListOp> {
        Some(match name {
            "maximum" => ListOp::Maximum,
            "minimum" => ListOp::Minimum,
            "range" => ListOp::Range,
            "midrange" => ListOp::Midrange,
            "sum" => ListOp::Sum,
            "median" => ListOp::Median,
            "mean" => ListOp::Mean,
            "variance" => ListOp::Variance,
            "stddev" => ListOp::Stddev,
            _ => return None,
        })
    }

    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            ListOp::Maximum => maximum(values),
            ListOp::Minimum => minimum(values),
            ListOp::Range => maximum(values) - minimum(values),
            ListOp::Midrange => (maximum(values) + minimum(values)) / 2.0,
            ListOp::Sum => values.iter().sum(),
            ListOp::Median => median(values),
            ListOp::Mean => mean(values),
            ListOp::Variance => variance(values),
            ListOp::Stddev => variance(values).sqrt(),
        }
    }
}

fn maximum(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn minimum(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Population variance.
fn variance(values: &[f64]) -> f64 {
    let avg = mean(values);
    mean(&values.iter().map(|x| (x - avg).powi(2)).collect::<Vec<_>>())
}
