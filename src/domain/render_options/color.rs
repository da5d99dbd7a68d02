use image::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(Rgba<u8>);

impl Color {
    pub const BLACK: Color = Color(Rgba([0, 0, 0, 255]));
    pub const WHITE: Color = Color(Rgba([255, 255, 255, 255]));

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `black` and `white`.
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim().to_lowercase();

        match trimmed.as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            _ => {}
        }

        let invalid = || format!("Invalid color: {trimmed:?} is not a hex color like #1a2b3c.");

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                    // '#abc' is shorthand for '#aabbcc'
                    let nibble = c.to_digit(16).ok_or_else(invalid)? as u8;
                    *slot = nibble * 17;
                }
                Ok(Self(Rgba([rgb[0], rgb[1], rgb[2], 255])))
            }
            6 => Ok(Self(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))),
            8 => Ok(Self(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?]))),
            _ => Err(invalid()),
        }
    }

    pub fn rgba(&self) -> Rgba<u8> {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.0.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}
