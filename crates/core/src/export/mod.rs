//! CSV export of a performance snapshot.
//!
//! Monetary values are rounded to two decimals here and nowhere else; the
//! engine itself carries exact decimals end to end.

use std::io::Write;

use csv::Writer;

use crate::errors::Result;
use crate::portfolio::performance::PerformanceSnapshot;

const HEADER: [&str; 8] = [
    "Symbol",
    "Company",
    "Quantity",
    "AvgPrice",
    "CurrentPrice",
    "Cost",
    "MarketValue",
    "P/L",
];

/// Write one row per position to `writer`, with a header row first.
pub fn write_holdings_csv<W: Write>(snapshot: &PerformanceSnapshot, writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for position in &snapshot.positions {
        csv_writer.write_record([
            position.symbol.as_str(),
            position.company_name.as_deref().unwrap_or(""),
            &position.quantity.to_string(),
            &position.average_cost.round_dp(2).to_string(),
            &position.current_price.round_dp(2).to_string(),
            &position.total_cost.round_dp(2).to_string(),
            &position.market_value.round_dp(2).to_string(),
            &position.profit_loss.round_dp(2).to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render the snapshot as an in-memory CSV string.
pub fn holdings_csv_string(snapshot: &PerformanceSnapshot) -> Result<String> {
    let mut buffer = Vec::new();
    write_holdings_csv(snapshot, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| crate::errors::Error::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::performance::HoldingPerformance;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn position(
        symbol: &str,
        company_name: Option<&str>,
        quantity: Decimal,
        average_cost: Decimal,
        current_price: Decimal,
    ) -> HoldingPerformance {
        let total_cost = quantity * average_cost;
        let market_value = quantity * current_price;
        HoldingPerformance {
            symbol: symbol.to_string(),
            company_name: company_name.map(|n| n.to_string()),
            quantity,
            average_cost,
            total_cost,
            current_price,
            market_value,
            profit_loss: market_value - total_cost,
        }
    }

    fn snapshot(positions: Vec<HoldingPerformance>) -> PerformanceSnapshot {
        let mut snapshot = PerformanceSnapshot::empty();
        for p in &positions {
            snapshot.total_purchase_cost += p.total_cost;
            snapshot.total_market_value += p.market_value;
        }
        snapshot.total_profit_loss = snapshot.total_market_value - snapshot.total_purchase_cost;
        snapshot.positions = positions;
        snapshot
    }

    #[test]
    fn test_empty_snapshot_is_header_only() {
        let csv = holdings_csv_string(&PerformanceSnapshot::empty()).unwrap();
        assert_eq!(
            csv,
            "Symbol,Company,Quantity,AvgPrice,CurrentPrice,Cost,MarketValue,P/L\n"
        );
    }

    #[test]
    fn test_one_row_per_position() {
        let csv = holdings_csv_string(&snapshot(vec![
            position("AAPL", Some("Apple Inc."), dec!(10), dec!(100), dec!(120)),
            position("MSFT", None, dec!(2), dec!(350), dec!(400)),
        ]))
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "AAPL,Apple Inc.,10,100.00,120.00,1000.00,1200.00,200.00");
        assert_eq!(lines[2], "MSFT,,2,350.00,400.00,700.00,800.00,100.00");
    }

    #[test]
    fn test_company_with_comma_is_quoted() {
        let csv = holdings_csv_string(&snapshot(vec![position(
            "AAPL",
            Some("Apple, Inc."),
            dec!(1),
            dec!(100),
            dec!(100),
        )]))
        .unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("\"Apple, Inc.\""));
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let csv = holdings_csv_string(&snapshot(vec![position(
            "XYZ",
            Some("\"Quoted\" Corp"),
            dec!(1),
            dec!(10),
            dec!(10),
        )]))
        .unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("\"\"\"Quoted\"\" Corp\""));
    }

    #[test]
    fn test_monetary_columns_rounded_to_two_decimals() {
        // 3 shares at 33.333... style costs produce long fractions internally.
        let csv = holdings_csv_string(&snapshot(vec![position(
            "AAPL",
            None,
            dec!(3),
            dec!(33.333),
            dec!(50.006),
        )]))
        .unwrap();
        let row = csv.lines().nth(1).unwrap();
        // Quantity stays exact; money is rounded for display.
        assert_eq!(row, "AAPL,,3,33.33,50.01,100.00,150.02,50.02");
    }

    #[test]
    fn test_negative_profit_loss_rendered() {
        let csv = holdings_csv_string(&snapshot(vec![position(
            "TSLA",
            None,
            dec!(5),
            dec!(200),
            dec!(180),
        )]))
        .unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with("-100.00"));
    }
}
