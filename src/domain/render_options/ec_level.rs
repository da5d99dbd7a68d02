/// Error-correction level. Unknown input falls back to `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl EcLevel {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "L" => Self::Low,
            "M" => Self::Medium,
            "Q" => Self::Quartile,
            _ => Self::High,
        }
    }
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}
