//! Chart colors and axis styling

/// An RGB color with an alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const FILL_ALPHA: f32 = 0.6;

/// A categorical palette, indexed cyclically by point position.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgba::opaque(255, 99, 132),
                Rgba::opaque(54, 162, 235),
                Rgba::opaque(255, 206, 86),
                Rgba::opaque(75, 192, 192),
                Rgba::opaque(153, 102, 255),
            ],
        }
    }
}

impl Palette {
    /// Build a palette from hex strings. Any invalid entry, or an empty list,
    /// gives back the default palette.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Self {
        let parsed: Option<Vec<Rgba>> = colors.iter().map(|c| Rgba::from_hex(c.as_ref())).collect();
        match parsed {
            Some(colors) if !colors.is_empty() => Self { colors },
            _ => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Solid border color for the point at `index`.
    pub fn border(&self, index: usize) -> Rgba {
        self.colors[index % self.colors.len()]
    }

    /// Translucent fill color for the point at `index`.
    pub fn fill(&self, index: usize) -> Rgba {
        self.border(index).with_alpha(FILL_ALPHA)
    }
}

/// Tick, grid and legend colors shared by every axis-bearing chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    pub tick: Rgba,
    pub grid: Rgba,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            tick: Rgba::opaque(0x94, 0xa3, 0xb8),
            grid: Rgba::opaque(0x33, 0x41, 0x55),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub palette: Palette,
    pub axis: AxisStyle,
    /// Legend labels and chart title.
    pub label: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            axis: AxisStyle::default(),
            label: Rgba::opaque(0xcb, 0xd5, 0xe1),
        }
    }
}

impl Theme {
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
