use std::fmt;
use std::ops::Neg;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub name: char,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn new(name: char, x: f64, y: f64, z: f64) -> Self {
        Self{name, x, y, z}
    }

    pub fn zero(name: char) -> Self {
        Self::new(name, 0.0, 0.0, 0.0)
    }

    // Results carry the left operand's name until the caller commits them.
    pub fn named(self, name: char) -> Self {
        Self{name, ..self}
    }

    pub fn components(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.components();
        write!(f, "{} = {x:.2} {y:.2} {z:.2}", self.name)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        scale(&self, -1.0)
    }
}

pub fn add(a: &Vector, b: &Vector) -> Vector {
    Vector::new(a.name, a.x + b.x, a.y + b.y, a.z + b.z)
}

pub fn subtract(a: &Vector, b: &Vector) -> Vector {
    Vector::new(a.name, a.x - b.x, a.y - b.y, a.z - b.z)
}

pub fn scale(v: &Vector, s: f64) -> Vector {
    Vector::new(v.name, v.x * s, v.y * s, v.z * s)
}

pub fn dot(a: &Vector, b: &Vector) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross(a: &Vector, b: &Vector) -> Vector {
    Vector::new(
        a.name,
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}
