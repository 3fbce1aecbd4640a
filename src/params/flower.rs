//! Static flower species table.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Petal silhouette class (consumed by the mesh builder)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetalShape {
    Cone,
    Wide,
    Thin,
    Ellipse,
}

/// Geometry and palette for one species
#[derive(Debug, Clone, Copy)]
pub struct SpeciesParams {
    pub name: &'static str,
    pub petal_count: usize,
    pub shape: PetalShape,
    /// Petal palette (sRGB hex)
    pub colors: [&'static str; 3],
    pub center_color: &'static str,
    /// Petal length (scene units)
    pub petal_length: f32,
    /// Petal width at the base (scene units)
    pub petal_width: f32,
    /// Distance of petal roots from the flower center (scene units)
    pub radius: f32,
}

/// Available species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowerSpecies {
    #[default]
    Default,
    Iris,
    Dandelion,
    Daisy,
}

impl FlowerSpecies {
    pub const ALL: [FlowerSpecies; 4] = [Self::Default, Self::Iris, Self::Dandelion, Self::Daisy];

    pub fn params(self) -> SpeciesParams {
        match self {
            Self::Default => SpeciesParams {
                name: "Nosuch Petals",
                petal_count: 24,
                shape: PetalShape::Cone,
                colors: ["#ff3366", "#ff6699", "#ff99cc"],
                center_color: "#ffdd00",
                petal_length: 2.0,
                petal_width: 0.5,
                radius: 2.5,
            },
            Self::Iris => SpeciesParams {
                name: "Violet Iris",
                petal_count: 6,
                shape: PetalShape::Wide,
                colors: ["#6a0dad", "#8a2be2", "#9966cc"],
                center_color: "#ffd700",
                petal_length: 2.5,
                petal_width: 0.8,
                radius: 2.2,
            },
            Self::Dandelion => SpeciesParams {
                name: "Dandelion",
                petal_count: 64,
                shape: PetalShape::Thin,
                colors: ["#ffff00", "#ffd700", "#ffed4e"],
                center_color: "#ff8c00",
                petal_length: 1.2,
                petal_width: 0.1,
                radius: 1.8,
            },
            Self::Daisy => SpeciesParams {
                name: "Daisy",
                petal_count: 16,
                shape: PetalShape::Ellipse,
                colors: ["#ffffff", "#f8f8ff", "#fffafa"],
                center_color: "#ffff00",
                petal_length: 1.8,
                petal_width: 0.4,
                radius: 2.0,
            },
        }
    }

    /// Petal count, falling back to the species value when `requested` is 0
    pub fn petal_count_or(self, requested: usize) -> usize {
        if requested == 0 {
            self.params().petal_count
        } else {
            requested
        }
    }

    /// Radius, falling back to the species value when `requested` is not positive
    pub fn radius_or(self, requested: f32) -> f32 {
        if requested > 0.0 {
            requested
        } else {
            self.params().radius
        }
    }
}

impl fmt::Display for FlowerSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::Default => "default",
            Self::Iris => "iris",
            Self::Dandelion => "dandelion",
            Self::Daisy => "daisy",
        };
        f.write_str(key)
    }
}

impl FromStr for FlowerSpecies {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|species| species.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("unknown flower species '{}'", s))
    }
}
