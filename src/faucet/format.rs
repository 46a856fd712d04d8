//! Display formatting and amount parsing.
//!
//! Balances travel as integer micro-STX and must convert exactly; nothing
//! here goes through floating point.

use thiserror::Error;

/// Micro-STX per STX.
pub const MICRO_PER_STX: u64 = 1_000_000;

/// Format a micro-STX amount as a human STX string.
///
/// The integer part is comma-grouped; the fractional part is trimmed of
/// trailing zeros and omitted entirely when zero.
pub fn format_stx(micro: u64) -> String {
    let whole = group_thousands(micro / MICRO_PER_STX);
    let frac = micro % MICRO_PER_STX;
    if frac == 0 {
        return whole;
    }
    let frac = format!("{:06}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Hours remaining for a cooldown of `blocks`, ceiling-rounded.
///
/// Ceiling matters: a user one block from eligibility must never read
/// "0 hours" while still blocked.
pub fn cooldown_hours(blocks: u64, blocks_per_hour: u64) -> u64 {
    blocks.div_ceil(blocks_per_hour.max(1))
}

/// Human cooldown estimate, e.g. "1 hour" or "3 hours".
pub fn format_cooldown(blocks: u64, blocks_per_hour: u64) -> String {
    match cooldown_hours(blocks, blocks_per_hour) {
        1 => "1 hour".to_string(),
        h => format!("{} hours", h),
    }
}

/// Explorer page for a transaction id.
pub fn explorer_link(explorer_url: &str, chain: &str, txid: &str) -> String {
    format!(
        "{}/txid/{}?chain={}",
        explorer_url.trim_end_matches('/'),
        txid,
        chain
    )
}

/// Errors from parsing a user-entered STX amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is not a number")]
    Invalid,

    #[error("STX has at most 6 decimal places")]
    TooManyDecimals,

    #[error("amount must be positive")]
    Zero,

    #[error("amount out of range")]
    Overflow,
}

/// Parse a user-entered STX amount into micro-STX, exactly.
///
/// Accepts plain decimal notation ("5", "0.05", ".5") with up to six
/// fractional digits. The result is always positive.
pub fn parse_stx_amount(input: &str) -> Result<u64, AmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Invalid);
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(AmountError::Invalid);
    }
    if frac.len() > 6 {
        return Err(AmountError::TooManyDecimals);
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };

    let mut frac_micro = 0u64;
    if !frac.is_empty() {
        let scale = 10u64.pow(6 - frac.len() as u32);
        frac_micro = frac.parse::<u64>().map_err(|_| AmountError::Invalid)? * scale;
    }

    let micro = whole
        .checked_mul(MICRO_PER_STX)
        .and_then(|m| m.checked_add(frac_micro))
        .ok_or(AmountError::Overflow)?;

    if micro == 0 {
        return Err(AmountError::Zero);
    }
    Ok(micro)
}
