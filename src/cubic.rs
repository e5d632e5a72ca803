//! Real roots of polynomials up to degree three.
//!
//! Cubics go through Cardano's method carried out in complex arithmetic, so the
//! case with three real roots (negative discriminant) is recovered from the
//! three cube roots of unity instead of being lost to a real cube root.

use log::debug;
use nalgebra::Complex;

use crate::polynomial::Polynomial;

/// Largest imaginary part, relative to the root magnitude, still treated as a real root
const IMAGINARY_TOLERANCE: f64 = 1e-9;
/// Negative quadratic discriminants down to this fraction of `b^2` are treated as tangent roots
const DISCRIMINANT_TOLERANCE: f64 = 1e-12;
/// Roots this far (relative) outside the search window are still accepted and clamped
const WINDOW_TOLERANCE: f64 = 1e-4;
const POLISH_ITERATIONS: usize = 4;

/// The real roots of a polynomial, ascending
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Roots {
    None,
    One(f64),
    Two(f64, f64),
    Three(f64, f64, f64),
}

impl Roots {
    fn from_values(values: &mut [f64]) -> Roots {
        values.sort_by(f64::total_cmp);
        match *values {
            [] => Roots::None,
            [a] => Roots::One(a),
            [a, b] => Roots::Two(a, b),
            [a, b, c, ..] => Roots::Three(a, b, c),
        }
    }

    fn values(&self) -> ([f64; 3], usize) {
        match *self {
            Roots::None => ([0.; 3], 0),
            Roots::One(a) => ([a, 0., 0.], 1),
            Roots::Two(a, b) => ([a, b, 0.], 2),
            Roots::Three(a, b, c) => ([a, b, c], 3),
        }
    }

    /// The smallest root inside `[lower, upper]`
    pub(crate) fn smallest_within(&self, lower: f64, upper: f64) -> Option<f64> {
        let (values, count) = self.values();
        values[..count].iter()
            .copied()
            .find(|root| *root >= lower && *root <= upper)
    }

    /// The root nearest to `[lower, upper]`, provided it lies within `tolerance` of it
    pub(crate) fn nearest_within(&self, lower: f64, upper: f64, tolerance: f64) -> Option<f64> {
        let (values, count) = self.values();
        let outside = |root: f64| (lower - root).max(root - upper).max(0.);
        values[..count].iter()
            .copied()
            .filter(|root| outside(*root) <= tolerance)
            .min_by(|a, b| outside(*a).total_cmp(&outside(*b)))
    }
}

/// Returns the real roots of `poly`, dispatching on which leading coefficients vanish
pub(crate) fn solve(poly: &Polynomial) -> Roots {
    let (a, b, c, d) = (poly.coeff(3), poly.coeff(2), poly.coeff(1), poly.coeff(0));
    match poly.degree() {
        0 | 1 | 2 => solve_quadratic(b, c, d),
        _ if b == 0. && c == 0. => Roots::One((-d / a).cbrt()),
        _ => solve_cardano(a, b, c, d),
    }
}

/// Returns the smallest root of `poly` inside `[0, upper]`, refined and clamped to the window
pub(crate) fn root_within(poly: &Polynomial, upper: f64) -> Option<f64> {
    let tolerance = WINDOW_TOLERANCE * upper.max(1.);
    let roots = solve(poly);
    // roots inside the window win over roots in the tolerance band
    let root = roots.smallest_within(0., upper)
        .or_else(|| roots.nearest_within(0., upper, tolerance))?;
    let root = polish(poly, root).max(0.).min(upper);
    debug!("Solved {} within [0, {}]: {:?} -> {}", poly, upper, roots, root);
    Some(root)
}

fn solve_linear(a: f64, b: f64) -> Roots {
    if a != 0. {
        Roots::One(-b / a)
    } else if b == 0. {
        // every value solves 0 = 0, the earliest one is the useful one
        Roots::One(0.)
    } else {
        Roots::None
    }
}

fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    if a == 0. {
        return solve_linear(b, c);
    }

    let mut discriminant = b * b - 4. * a * c;
    if discriminant < 0. {
        if discriminant < -DISCRIMINANT_TOLERANCE * b * b {
            return Roots::None;
        }
        discriminant = 0.;
    }

    // avoid cancellation between -b and the square root
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    if q == 0. {
        return Roots::One(0.);
    }
    Roots::from_values(&mut [q / a, c / q])
}

fn solve_cardano(a: f64, b: f64, c: f64, d: f64) -> Roots {
    let (b, c, d) = (b / a, c / a, d / a);

    // depressed cubic y^3 + p*y + q = 0 with x = y - b/3
    let shift = b / 3.;
    let p = c - b * b / 3.;
    let q = 2. * b * b * b / 27. - b * c / 3. + d;

    let discriminant = Complex::new(q * q / 4. + p * p * p / 27., 0.).sqrt();
    let u_plus = Complex::new(-q / 2., 0.) + discriminant;
    let u_minus = Complex::new(-q / 2., 0.) - discriminant;
    let u_cubed = if u_plus.norm() >= u_minus.norm() { u_plus } else { u_minus };
    if u_cubed.norm() == 0. {
        // p == q == 0, triple root
        return Roots::One(-shift);
    }

    let u = complex_cbrt(u_cubed);
    let omega = Complex::new(-0.5, 3f64.sqrt() / 2.);
    let mut rotation = Complex::new(1., 0.);
    let mut real = [0.; 3];
    let mut count = 0;
    for _ in 0..3 {
        let u_k = u * rotation;
        let root = u_k - Complex::new(p, 0.) / (u_k * 3.) - shift;
        if root.im.abs() <= IMAGINARY_TOLERANCE * root.norm().max(1.) {
            real[count] = root.re;
            count += 1;
        }
        rotation *= omega;
    }
    Roots::from_values(&mut real[..count])
}

/// Principal cube root
fn complex_cbrt(z: Complex<f64>) -> Complex<f64> {
    let (r, theta) = z.to_polar();
    Complex::from_polar(r.cbrt(), theta / 3.)
}

/// Newton steps on a root, kept only while they shrink the residual
fn polish(poly: &Polynomial, root: f64) -> f64 {
    let derivative = poly.derivative();
    let mut best = root;
    let mut residual = poly.eval(root).abs();
    for _ in 0..POLISH_ITERATIONS {
        let slope = derivative.eval(best);
        if slope == 0. || residual == 0. {
            break;
        }
        let candidate = best - poly.eval(best) / slope;
        let candidate_residual = poly.eval(candidate).abs();
        if !(candidate_residual < residual) {
            break;
        }
        best = candidate;
        residual = candidate_residual;
    }
    best
}
