//! Color handling for word clouds
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and [`Palette`], an ordered list of colors that is
//! indexed cyclically.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use termcloud_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha value.
    ///
    /// # Examples
    ///
    /// ```
    /// use termcloud_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let faded = red.with_alpha(0.5);
    /// assert_eq!(faded.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// An ordered list of colors, indexed cyclically.
///
/// # Examples
///
/// ```
/// use termcloud_core::color::Palette;
///
/// let palette = Palette::parse(&["red", "green"]).unwrap();
/// assert_eq!(palette.pick(0), palette.pick(2));
/// assert_ne!(palette.pick(0), palette.pick(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// The ten-color categorical scheme used by d3 (`schemeCategory10`).
    pub const CATEGORY10: [&'static str; 10] = [
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ];

    /// Parses every entry as a CSS color.
    ///
    /// # Errors
    ///
    /// Returns an error for the first entry that is not a valid color, or
    /// when the list is empty.
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self, String> {
        if colors.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }
        let colors = colors
            .iter()
            .map(|c| Color::new(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    /// Returns the color at `index`, wrapping around the end of the palette.
    pub fn pick(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::parse(&Self::CATEGORY10).expect("category10 entries are valid CSS colors")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }

    #[test]
    fn test_palette_default_has_ten_colors() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.pick(10), palette.pick(0));
    }

    #[test]
    fn test_palette_rejects_empty_and_invalid() {
        let empty: [&str; 0] = [];
        assert!(Palette::parse(&empty).is_err());
        assert!(Palette::parse(&["red", "nope"]).is_err());
    }
}
