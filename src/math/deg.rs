use super::Rad;

/// An angle in degrees. Convert to [`Rad`] before doing trigonometry.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Deg(pub f32);

impl From<Deg> for Rad {
    fn from(deg: Deg) -> Rad {
        Rad(deg.0 * std::f32::consts::PI / 180.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_to_radian() {
        let Rad(half_turn) = Deg(180.0).into();
        assert!((half_turn - std::f32::consts::PI).abs() < 1e-6);
        let Rad(five) = Deg(5.0).into();
        assert!((five - 5.0 * std::f32::consts::PI / 180.0).abs() < 1e-7);
    }
}
