use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Which rules a puzzle file is loaded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Walls, agent walls, movables and any number of goals.
    Standard,
    /// Only the agent and a single goal, no walls, the grid edge stops the agent.
    Braindead,
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Standard
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Variant::Standard => write!(f, "standard"),
            Variant::Braindead => write!(f, "braindead"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantErr(pub String);

impl Display for VariantErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown puzzle variant: {}", self.0)
    }
}

impl Error for VariantErr {}

impl FromStr for Variant {
    type Err = VariantErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Variant::Standard),
            "braindead" => Ok(Variant::Braindead),
            _ => Err(VariantErr(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names() {
        for &variant in &[Variant::Standard, Variant::Braindead] {
            assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
        }
        assert_eq!("Braindead".parse::<Variant>().unwrap(), Variant::Braindead);
        assert_eq!(
            "cubes".parse::<Variant>().unwrap_err(),
            VariantErr("cubes".to_string())
        );
        assert_eq!(Variant::default(), Variant::Standard);
    }
}
