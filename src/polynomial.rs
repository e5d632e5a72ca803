use std::fmt;
use std::fmt::Formatter;

/// a polynomial represented by its coefficients, index corresponds to power
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Returns an initialized polynomial
    ///
    /// # Arguments
    ///
    /// `coeffs` - coefficients where index corresponds to power
    ///
    /// # Examples
    ///
    /// ```
    /// use scurvegen::Polynomial;
    /// // f(t) = 7 - 2t + 3t^2
    /// let poly = Polynomial::new(&[7., -2., 3.]);
    /// ```
    pub fn new(coeffs: &[f64]) -> Polynomial {
        if coeffs.is_empty() {
            panic!("Cannot initialize Polynomial with empty coefficients!");
        }
        Polynomial { coeffs: coeffs.to_vec() }
    }

    /// Returns the cubic `c3*t^3 + c2*t^2 + c1*t + c0`
    pub fn cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> Polynomial {
        Polynomial { coeffs: vec![c0, c1, c2, c3] }
    }

    /// Returns the coefficient for the given power, zero past the highest stored power
    pub fn coeff(&self, power: usize) -> f64 {
        self.coeffs.get(power).copied().unwrap_or(0.)
    }

    /// Returns the highest power with a non-zero coefficient
    pub fn degree(&self) -> usize {
        self.coeffs.iter().rposition(|c| *c != 0.).unwrap_or(0)
    }

    /// Returns the solution to f(t) at a given t
    ///
    /// # Examples
    ///
    /// ```
    /// use scurvegen::Polynomial;
    /// // f(t) = 7 - 2t + 3t^2
    /// let poly = Polynomial::new(&[7., -2., 3.]);
    /// assert_eq!(8., poly.eval(1.));
    /// ```
    pub fn eval(&self, t: f64) -> f64 {
        // Horner's scheme
        self.coeffs.iter().rev().fold(0., |acc, c| acc * t + c)
    }

    /// Returns the derivative of the polynomial
    pub fn derivative(&self) -> Polynomial {
        // special case when we are down to a single coefficient
        if self.coeffs.len() == 1 {
            return Polynomial::new(&[0.]);
        }

        // drop coefficient at index 0, and multiply coefficients by power
        let coeffs: Vec<f64> = self.coeffs.iter()
            .enumerate()
            .skip(1)
            .map(|(power, c)| c * power as f64)
            .collect();
        Polynomial { coeffs }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = String::from("f(t) =");
        for (idx, coeff) in self.coeffs.iter().enumerate() {
            if *coeff == 0. {
                continue;
            }

            if coeff.is_sign_negative() {
                s.push_str(&format!(" - {}", -coeff));
            } else {
                s.push_str(&format!(" + {}", coeff));
            }

            match idx {
                0 => {}
                1 => s.push('t'),
                _ => s.push_str(&format!("t^{}", idx)),
            }
        }
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poly_new() {
        // f(t) = -1.5 + 4t + 0.25t^2
        let poly = Polynomial::new(&[-1.5, 4., 0.25]);
        assert_eq!(3, poly.coeffs.len());
        assert_eq!(-1.5, poly.coeff(0));
        assert_eq!(4., poly.coeff(1));
        assert_eq!(0.25, poly.coeff(2));
        assert_eq!(0., poly.coeff(7));
        assert_eq!(2, poly.degree());
    }

    #[test]
    fn poly_cubic() {
        let poly = Polynomial::cubic(-4., 0., 0.5, 1. / 3.);
        assert_eq!(3, poly.degree());
        assert_eq!(-4., poly.coeff(0));
        assert_eq!(0.5, poly.coeff(2));
        assert_eq!(Polynomial::new(&[-4., 0., 0.5, 1. / 3.]), poly);

        // a drift phase only keeps the carried velocity
        let poly = Polynomial::cubic(-4., 2., 0., 0.);
        assert_eq!(1, poly.degree());

        let poly = Polynomial::cubic(0., 0., 0., 0.);
        assert_eq!(0, poly.degree());
    }

    #[test]
    fn poly_eval() {
        // ramp down from velocity 3 and acceleration 2 with jerk 3, 2 units short of the target
        let poly = Polynomial::cubic(-2., 3., 1., -0.5);
        assert_eq!(-2., poly.eval(0.));
        assert_eq!(1.5, poly.eval(1.));
        assert_eq!(4., poly.eval(2.));
        assert_eq!(-3.5, poly.eval(-1.));
    }

    #[test]
    fn poly_derivative() {
        let poly = Polynomial::cubic(-2., 3., 1., -0.5);

        // velocity: 3 + 2t - 1.5t^2
        let poly = poly.derivative();
        assert_eq!(Polynomial::new(&[3., 2., -1.5]), poly);

        // acceleration: 2 - 3t
        let poly = poly.derivative();
        assert_eq!(Polynomial::new(&[2., -3.]), poly);

        // jerk
        let poly = poly.derivative();
        assert_eq!(Polynomial::new(&[-3.]), poly);

        let poly = poly.derivative();
        assert_eq!(Polynomial::new(&[0.]), poly);
        assert_eq!(0, poly.degree());
    }

    #[test]
    fn poly_print() {
        let poly = Polynomial::cubic(-2., 3., 1., -0.5);
        assert_eq!("f(t) = - 2 + 3t + 1t^2 - 0.5t^3", poly.to_string());

        // starting from rest
        let poly = Polynomial::cubic(-0.25, 0., -1.5, 0.125);
        assert_eq!("f(t) = - 0.25 - 1.5t^2 + 0.125t^3", poly.to_string());

        let poly = Polynomial::cubic(-10., 2.5, 0., 0.);
        assert_eq!("f(t) = - 10 + 2.5t", poly.to_string());

        let poly = Polynomial::cubic(0., 0., -0., 0.);
        assert_eq!("f(t) =", poly.to_string());
    }
}
