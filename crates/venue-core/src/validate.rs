//! Structural validation of submissions.
//!
//! Runs before any state is touched; a rejected request mutates nothing
//! and is not counted in stats.

use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::order::OrderRequest;

pub(crate) fn validate(req: &OrderRequest) -> Result<(), EngineError> {
    if req.order_id.trim().is_empty() || req.symbol.trim().is_empty() {
        return Err(EngineError::invalid(&req.order_id, "missing required fields"));
    }

    if req.quantity <= Decimal::ZERO {
        return Err(EngineError::invalid(&req.order_id, "quantity must be positive"));
    }

    if req.order_type.uses_boundary() && !req.price.is_some_and(|p| p > Decimal::ZERO) {
        return Err(EngineError::invalid(
            &req.order_id,
            "price must be positive for non-market orders",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_type::OrderType;
    use crate::side::Side;

    fn request() -> OrderRequest {
        OrderRequest {
            order_id: "o1".into(),
            symbol: "BTC-USDT".into(),
            side: Side::Buy,
            order_type: OrderType::Limit,
            quantity: "1.0".parse().unwrap(),
            price: Some("50000".parse().unwrap()),
        }
    }

    #[test]
    fn accepts_well_formed_request() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn rejects_blank_identifiers() {
        let mut req = request();
        req.order_id = "  ".into();
        assert!(validate(&req).is_err());

        let mut req = request();
        req.symbol = String::new();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let mut req = request();
        req.quantity = Decimal::ZERO;
        assert!(validate(&req).is_err());

        req.quantity = "-1".parse().unwrap();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn price_required_for_all_types_except_market() {
        for order_type in [OrderType::Limit, OrderType::Ioc, OrderType::Fok] {
            let mut req = request();
            req.order_type = order_type;
            req.price = None;
            assert!(validate(&req).is_err(), "{order_type} must require a price");

            req.price = Some(Decimal::ZERO);
            assert!(validate(&req).is_err());
        }

        let mut req = request();
        req.order_type = OrderType::Market;
        req.price = None;
        assert!(validate(&req).is_ok());
    }
}
