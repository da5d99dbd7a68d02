mod color;
mod ec_level;
mod module_size;

pub use color::Color;
pub use ec_level::EcLevel;
pub use module_size::ModuleSize;

/// Rendering choices submitted alongside the text.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub foreground: Color,
    pub background: Color,
    pub module_size: ModuleSize,
    pub ec_level: EcLevel,
}

impl RenderOptions {
    pub fn new(fg: String, bg: String, box_size: String, ecc: &str) -> Result<Self, String> {
        Ok(Self {
            foreground: Color::parse(fg)?,
            background: Color::parse(bg)?,
            module_size: ModuleSize::parse(box_size)?,
            ec_level: EcLevel::parse(ecc),
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            module_size: ModuleSize::default(),
            ec_level: EcLevel::default(),
        }
    }
}
