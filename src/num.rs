// Minimal float trait for the generic transform (no_std; libm supplies the
// square root so no std math is required).
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f32(x: f32) -> Self;
    fn sqrt(self) -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x as f64
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_matches_for_both_widths() {
        assert!((<f32 as Float>::sqrt(2.0) - 1.414_213_5).abs() < 1e-6);
        assert!((<f64 as Float>::sqrt(2.0) - core::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn constants() {
        assert_eq!(<f64 as Float>::zero(), 0.0);
        assert_eq!(<f64 as Float>::one(), 1.0);
        assert_eq!(<f64 as Float>::from_f32(0.5), 0.5);
    }
}
