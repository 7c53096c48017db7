//! Slot enum naming the four independently chosen part groups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// One of the four part groups a combination draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Character,
    Kart,
    Wheel,
    Glider,
}

impl Slot {
    /// Returns all slots in generation order (outermost first).
    pub fn all() -> &'static [Slot; 4] {
        &[Slot::Character, Slot::Kart, Slot::Wheel, Slot::Glider]
    }

    /// Returns the 0-based position of this slot in generation order.
    pub fn order_index(&self) -> usize {
        match self {
            Slot::Character => 0,
            Slot::Kart => 1,
            Slot::Wheel => 2,
            Slot::Glider => 3,
        }
    }

    /// Returns the display name, also used as a table column header.
    pub fn display_name(&self) -> &'static str {
        match self {
            Slot::Character => "Character",
            Slot::Kart => "Kart",
            Slot::Wheel => "Wheel",
            Slot::Glider => "Glider",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Slot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character" | "characters" => Ok(Slot::Character),
            "kart" | "karts" | "vehicle" => Ok(Slot::Kart),
            "wheel" | "wheels" | "tire" | "tires" => Ok(Slot::Wheel),
            "glider" | "gliders" => Ok(Slot::Glider),
            "" => Err(ValidationError::empty_field("slot")),
            other => Err(ValidationError::invalid_format(
                "slot",
                format!("unknown slot '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_generation_order() {
        let indices: Vec<_> = Slot::all().iter().map(|s| s.order_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn parses_plural_and_singular_names() {
        assert_eq!("Characters".parse::<Slot>().unwrap(), Slot::Character);
        assert_eq!("kart".parse::<Slot>().unwrap(), Slot::Kart);
        assert_eq!("Tires".parse::<Slot>().unwrap(), Slot::Wheel);
        assert_eq!("glider".parse::<Slot>().unwrap(), Slot::Glider);
    }

    #[test]
    fn rejects_unknown_slot() {
        assert!("spoiler".parse::<Slot>().is_err());
        assert!("".parse::<Slot>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Slot::Glider).unwrap(), "\"glider\"");
    }
}
