use crate::utils::error::{Result, SizingError};

/// 從 `"0.096 USD"` 這類字串取出每小時價格
pub fn parse_price(raw: &str) -> Result<f64> {
    let malformed = || SizingError::MalformedPrice {
        raw: raw.to_string(),
    };

    let token = raw.split_whitespace().next().ok_or_else(malformed)?;
    let price: f64 = token.parse().map_err(|_| malformed())?;

    // "NaN"、"inf" 也能被 f64 解析，但不是合法價格
    if !price.is_finite() {
        return Err(malformed());
    }

    Ok(price)
}
