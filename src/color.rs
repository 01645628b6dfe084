//! Cell colors of the bi-color matrix.

use crate::error::MatrixError;

/// A 2-bit cell value.
///
/// The bi-color backpack mixes green and red LEDs, so `Yellow` is both on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    /// LED off.
    #[default]
    Off = 0,
    /// Green LED.
    Green = 1,
    /// Red LED.
    Red = 2,
    /// Green and red together.
    Yellow = 3,
}

impl Color {
    /// The raw 2-bit value.
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Color {
    type Error = MatrixError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Off),
            1 => Ok(Color::Green),
            2 => Ok(Color::Red),
            3 => Ok(Color::Yellow),
            other => Err(MatrixError::InvalidColor(other)),
        }
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        color.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_range() {
        for value in 0..=3u8 {
            assert_eq!(Color::try_from(value).unwrap().value(), value);
        }
        assert!(matches!(Color::try_from(4), Err(MatrixError::InvalidColor(4))));
        assert!(matches!(
            Color::try_from(255),
            Err(MatrixError::InvalidColor(255))
        ));
    }
}
