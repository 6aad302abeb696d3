//! Quantity catalog: which OBIS code and value width carry each reading.
//!
//! All quantities of this meter family share the code layout
//! `1-1:<type>.7.0*255`; only value group C differs.

use std::fmt;

use serde::Serialize;

use crate::payload::obis::{FieldWidth, ObisCode};

/// The readings that can be extracted from a meter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuantityId {
    ActivePowerPlus,
    ActivePowerMinus,
    ReactivePowerPlus,
    ReactivePowerMinus,
    VoltageL1,
    VoltageL2,
    VoltageL3,
    CurrentL1,
    CurrentL2,
    CurrentL3,
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub quantity: QuantityId,
    pub code: ObisCode,
    pub width: FieldWidth,
    pub name: &'static str,
    pub unit: &'static str,
}

const fn entry(
    quantity: QuantityId,
    type_code: u8,
    width: FieldWidth,
    name: &'static str,
    unit: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        quantity,
        code: ObisCode::new(1, 1, type_code, 7, 0, 0xFF),
        width,
        name,
        unit,
    }
}

/// Catalog rows, in the declaration order of [`QuantityId`].
pub static QUANTITY_CATALOG: [CatalogEntry; 10] = [
    entry(QuantityId::ActivePowerPlus, 0x01, FieldWidth::Four, "Active power +", "W"),
    entry(QuantityId::ActivePowerMinus, 0x02, FieldWidth::Four, "Active power -", "W"),
    entry(QuantityId::ReactivePowerPlus, 0x03, FieldWidth::Four, "Reactive power +", "var"),
    entry(QuantityId::ReactivePowerMinus, 0x04, FieldWidth::Four, "Reactive power -", "var"),
    entry(QuantityId::VoltageL1, 0x20, FieldWidth::Two, "Voltage L1", "V"),
    entry(QuantityId::VoltageL2, 0x34, FieldWidth::Two, "Voltage L2", "V"),
    entry(QuantityId::VoltageL3, 0x48, FieldWidth::Two, "Voltage L3", "V"),
    entry(QuantityId::CurrentL1, 0x1F, FieldWidth::Four, "Current L1", "A"),
    entry(QuantityId::CurrentL2, 0x33, FieldWidth::Four, "Current L2", "A"),
    entry(QuantityId::CurrentL3, 0x47, FieldWidth::Four, "Current L3", "A"),
];

impl QuantityId {
    /// Every quantity, in catalog order.
    pub const ALL: [QuantityId; 10] = [
        QuantityId::ActivePowerPlus,
        QuantityId::ActivePowerMinus,
        QuantityId::ReactivePowerPlus,
        QuantityId::ReactivePowerMinus,
        QuantityId::VoltageL1,
        QuantityId::VoltageL2,
        QuantityId::VoltageL3,
        QuantityId::CurrentL1,
        QuantityId::CurrentL2,
        QuantityId::CurrentL3,
    ];

    pub fn entry(self) -> &'static CatalogEntry {
        &QUANTITY_CATALOG[self as usize]
    }

    pub fn obis_code(self) -> ObisCode {
        self.entry().code
    }

    pub fn width(self) -> FieldWidth {
        self.entry().width
    }

    pub fn unit(self) -> &'static str {
        self.entry().unit
    }

    pub fn is_current(self) -> bool {
        matches!(
            self,
            QuantityId::CurrentL1 | QuantityId::CurrentL2 | QuantityId::CurrentL3
        )
    }

    /// Reverse lookup by OBIS value group C.
    pub fn from_type_code(type_code: u8) -> Option<QuantityId> {
        QUANTITY_CATALOG
            .iter()
            .find(|e| e.code.group_c() == type_code)
            .map(|e| e.quantity)
    }
}

impl fmt::Display for QuantityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rows_match_their_quantity() {
        for (i, quantity) in QuantityId::ALL.iter().enumerate() {
            assert_eq!(QUANTITY_CATALOG[i].quantity, *quantity);
            assert_eq!(quantity.entry().quantity, *quantity);
        }
    }

    #[test]
    fn test_type_codes() {
        let codes: Vec<u8> = QuantityId::ALL.iter().map(|q| q.obis_code().group_c()).collect();
        assert_eq!(codes, vec![0x01, 0x02, 0x03, 0x04, 0x20, 0x34, 0x48, 0x1F, 0x33, 0x47]);
    }

    #[test]
    fn test_shared_code_layout() {
        for quantity in QuantityId::ALL {
            let [a, b, _, d, e, f] = *quantity.obis_code().as_bytes();
            assert_eq!((a, b, d, e, f), (1, 1, 7, 0, 0xFF));
        }
    }

    #[test]
    fn test_widths() {
        for quantity in QuantityId::ALL {
            let expected = match quantity {
                QuantityId::VoltageL1 | QuantityId::VoltageL2 | QuantityId::VoltageL3 => {
                    FieldWidth::Two
                }
                _ => FieldWidth::Four,
            };
            assert_eq!(quantity.width(), expected, "{quantity}");
        }
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(QuantityId::from_type_code(0x47), Some(QuantityId::CurrentL3));
        assert_eq!(QuantityId::from_type_code(0x20), Some(QuantityId::VoltageL1));
        assert_eq!(QuantityId::from_type_code(0x05), None);
    }

    #[test]
    fn test_display_and_unit() {
        assert_eq!(QuantityId::ReactivePowerMinus.to_string(), "Reactive power -");
        assert_eq!(QuantityId::CurrentL2.unit(), "A");
        assert!(QuantityId::CurrentL2.is_current());
        assert!(!QuantityId::VoltageL2.is_current());
    }
}
