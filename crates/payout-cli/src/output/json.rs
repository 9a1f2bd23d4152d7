use payout_core::error::PayoutError;
use payout_core::parsing::ParsedStatement;

pub fn print(parsed: &ParsedStatement) -> Result<(), PayoutError> {
    let json = serde_json::to_string_pretty(parsed)?;
    println!("{json}");
    Ok(())
}
