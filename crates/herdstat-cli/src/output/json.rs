use herdstat_core::error::HerdError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), HerdError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
