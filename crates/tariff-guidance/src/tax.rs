//! Tax-and-duty applicability.

use tariff_core::{is_eu_member, TradeType};

/// Country code of Northern Ireland.
pub const NORTHERN_IRELAND: &str = "XI";

/// Whether import tax and duty guidance applies to a movement.
///
/// Exports are never subject to import duty. Goods moving into Northern
/// Ireland from an EU member state are not either. Every other import is.
pub fn tax_and_duty_applicable(trade_type: TradeType, origin: &str, destination: &str) -> bool {
    match trade_type {
        TradeType::Export => false,
        TradeType::Import => !(destination == NORTHERN_IRELAND && is_eu_member(origin)),
    }
}
