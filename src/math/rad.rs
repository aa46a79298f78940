/// An angle in radians.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Rad(pub f32);

impl Rad {
    /// The zero angle.
    pub fn zero() -> Rad {
        Rad(0.0)
    }

    /// The sine and cosine of the angle.
    pub fn sin_cos(self) -> (f32, f32) {
        self.0.sin_cos()
    }

    /// The tangent of the angle.
    pub fn tan(self) -> f32 {
        self.0.tan()
    }
}

impl std::ops::Add for Rad {
    type Output = Rad;
    fn add(self, other: Rad) -> Rad {
        Rad(self.0 + other.0)
    }
}

impl std::ops::AddAssign for Rad {
    fn add_assign(&mut self, other: Rad) {
        *self = Rad(self.0 + other.0)
    }
}

impl std::ops::Sub for Rad {
    type Output = Rad;
    fn sub(self, other: Rad) -> Rad {
        Rad(self.0 - other.0)
    }
}

impl std::ops::SubAssign for Rad {
    fn sub_assign(&mut self, other: Rad) {
        *self = Rad(self.0 - other.0)
    }
}

impl std::ops::Neg for Rad {
    type Output = Rad;
    fn neg(self) -> Rad {
        Rad(-self.0)
    }
}

impl std::ops::Div<f32> for Rad {
    type Output = Rad;
    fn div(self, other: f32) -> Rad {
        Rad(self.0 / other)
    }
}
