#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSize(u32);

impl ModuleSize {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 40;

    /// Pixel edge length of a single QR module.
    pub fn parse(s: String) -> Result<Self, String> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| "Invalid box size: must be a whole number.".to_string())?;

        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(format!(
                "Invalid box size: must be between {} and {}.",
                Self::MIN,
                Self::MAX
            ));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for ModuleSize {
    fn default() -> Self {
        Self(10)
    }
}
