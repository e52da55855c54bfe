use serde::{Deserialize, Serialize};

use crate::error::BoxpackError;
use crate::packing::PackableItem;

/// Length unit used by a layout request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "m")]
    Meters,
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "in")]
    Inches,
}

impl Unit {
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Unit::Meters => value,
            Unit::Centimeters => value / 100.0,
            Unit::Inches => value * 0.0254,
        }
    }
}

/// Container floor, as measured
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub width: f64,
    pub length: f64,
}

/// One object footprint in a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    /// Display name used when reporting items that cannot be organized
    #[serde(default)]
    pub name: Option<String>,
    pub width: f64,
    pub length: f64,
    /// The object is already turned 90 degrees in the scene
    #[serde(default)]
    pub rotated: bool,
}

impl ItemSpec {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A container plus the footprints to organize inside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Base name for output files; defaults to the request file stem
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Unit,
    pub container: ContainerSpec,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

impl LayoutRequest {
    /// Container floor in meters as (width, height)
    pub fn container_meters(&self) -> Result<(f64, f64), BoxpackError> {
        let ContainerSpec { width, length } = self.container;
        if !width.is_finite() || !length.is_finite() || width < 0.0 || length < 0.0 {
            return Err(BoxpackError::InvalidContainer { width, length });
        }
        Ok((self.unit.to_meters(width), self.unit.to_meters(length)))
    }

    /// Convert the item specs to packable footprints in meters
    pub fn packable_items(&self) -> Result<Vec<PackableItem>, BoxpackError> {
        self.items
            .iter()
            .map(|spec| {
                let valid = |v: f64| v.is_finite() && v > 0.0;
                if !valid(spec.width) || !valid(spec.length) {
                    return Err(BoxpackError::InvalidItem {
                        id: spec.id.clone(),
                        width: spec.width,
                        length: spec.length,
                    });
                }

                let mut item = PackableItem::new(
                    spec.id.clone(),
                    self.unit.to_meters(spec.width),
                    self.unit.to_meters(spec.length),
                );
                item.rotated = spec.rotated;
                Ok(item)
            })
            .collect()
    }

    pub fn find_item(&self, id: &str) -> Option<&ItemSpec> {
        self.items.iter().find(|spec| spec.id == id)
    }

    /// Display label for an item id, falling back to the id itself
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.find_item(id).map_or(id, ItemSpec::label)
    }
}
