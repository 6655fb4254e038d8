//! Numeric sampling of parsed equations for drawing.
//!
//! Curves come back as separate segments wherever the function is undefined or has a
//! pole between neighbouring samples, so a renderer can join each segment's points
//! without drawing spurious vertical lines.

use std::f64::consts::E;

use crate::equation::{Base, InverseTrigFunction, ParsedEquation, Payload, TrigFunction};
use crate::eval::{eval_at, rational_to_f64};

pub type Segment = Vec<(f64, f64)>;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub x_min: f64,
    pub x_max: f64,
    pub samples: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            x_min: -10.0,
            x_max: 10.0,
            samples: 400,
        }
    }
}

pub fn sample(equation: &ParsedEquation, settings: &PlotSettings) -> Vec<Segment> {
    let (x_min, x_max) = match &equation.payload {
        Payload::InverseTrigonometric(InverseTrigFunction::Arcsin | InverseTrigFunction::Arccos) => {
            (settings.x_min.max(-1.0), settings.x_max.min(1.0))
        }
        _ => (settings.x_min, settings.x_max),
    };
    if settings.samples < 2 || !(x_min < x_max) {
        return Vec::new();
    }

    let f = sampler(&equation.payload, equation.independent_var);
    let step = (x_max - x_min) / (settings.samples - 1) as f64;
    let mut segments = Vec::new();
    let mut current: Segment = Vec::new();
    let mut prev_x: Option<f64> = None;

    for i in 0..settings.samples {
        let x = x_min + step * i as f64;
        let y = f(x).filter(|y| y.is_finite());
        let broken = prev_x.is_some_and(|px| crosses_pole(&equation.payload, px, x));
        match y {
            Some(y) if !broken => current.push((x, y)),
            Some(y) => {
                flush(&mut segments, &mut current);
                current.push((x, y));
            }
            None => flush(&mut segments, &mut current),
        }
        prev_x = Some(x);
    }
    flush(&mut segments, &mut current);
    segments
}

fn flush(segments: &mut Vec<Segment>, current: &mut Segment) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

/// Whether a vertical asymptote lies between two consecutive samples.
fn crosses_pole(payload: &Payload, a: f64, b: f64) -> bool {
    match payload {
        Payload::Reciprocal { exponent, .. } if *exponent > 0 => a < 0.0 && b > 0.0,
        Payload::Trigonometric(TrigFunction::Tan) => a.cos().signum() != b.cos().signum(),
        _ => false,
    }
}

fn sampler(payload: &Payload, var: char) -> Box<dyn Fn(f64) -> Option<f64> + '_> {
    match payload {
        Payload::Linear { m, b } => {
            let (m, b) = (rational_to_f64(m), rational_to_f64(b));
            Box::new(move |x| Some(m * x + b))
        }
        Payload::Polynomial(coeffs) => {
            let coeffs: Vec<f64> = coeffs.iter().map(rational_to_f64).collect();
            Box::new(move |x| Some(coeffs.iter().fold(0.0, |acc, c| acc * x + c)))
        }
        Payload::Reciprocal {
            numerator,
            exponent,
        } => {
            let numerator = rational_to_f64(numerator);
            let exponent = i32::try_from(*exponent).unwrap_or(i32::MAX);
            Box::new(move |x| (x != 0.0).then(|| numerator / x.powi(exponent)))
        }
        Payload::Exponential { base, rate } => {
            let base = base_value(base);
            let rate = rational_to_f64(rate);
            Box::new(move |x| Some(base.powf(rate * x)))
        }
        Payload::Logarithmic { base } => {
            let ln_base = base_value(base).ln();
            Box::new(move |x| (x > 0.0).then(|| x.ln() / ln_base))
        }
        Payload::Trigonometric(function) => {
            let function = *function;
            Box::new(move |x| {
                Some(match function {
                    TrigFunction::Sin => x.sin(),
                    TrigFunction::Cos => x.cos(),
                    TrigFunction::Tan => x.tan(),
                })
            })
        }
        Payload::InverseTrigonometric(function) => {
            let function = *function;
            Box::new(move |x| match function {
                InverseTrigFunction::Arcsin => (-1.0..=1.0).contains(&x).then(|| x.asin()),
                InverseTrigFunction::Arccos => (-1.0..=1.0).contains(&x).then(|| x.acos()),
                InverseTrigFunction::Arctan => Some(x.atan()),
            })
        }
        Payload::Symbolic(expr) => {
            let name = var.to_string();
            Box::new(move |x| eval_at(expr, &name, x))
        }
    }
}

fn base_value(base: &Base) -> f64 {
    match base {
        Base::E => E,
        Base::Real(b) => rational_to_f64(b),
    }
}
