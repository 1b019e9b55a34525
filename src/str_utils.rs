/// Utility functions for building the IN-list demonstration statement
use crate::result::{InListError, Result};

/// First portion of the query that searches for numerals IN a list
pub const IN_QUERY_PREFIX: &str = "SELECT numeral1 FROM numeral WHERE numeral1 IN ";

/// One past Oracle's historical 1000-expression limit, so the default run triggers ORA-01795
pub const DEFAULT_IN_LIST_SIZE: i32 = 1001;

// Up-front allocation ceiling; larger lists grow as they are written
const MAX_PREALLOCATION: usize = 1 << 20;

/// Parse an IN-list size given on the command line
pub fn parse_in_list_size(input: &str) -> Result<i32> {
    input.trim().parse::<i32>().map_err(|_| {
        InListError::InvalidArgument(format!(
            "IN-list size must be an integer between 1 and {}, got {input}",
            i32::MAX
        ))
    })
}

/// Build the parenthesized list `(1,2,...,count)`
pub fn build_in_list(count: i32) -> Result<String> {
    if count < 1 {
        return Err(InListError::InvalidArgument(format!(
            "IN-list size must be at least 1, got {count}"
        )));
    }

    let mut list = String::with_capacity(initial_capacity(count));
    list.push('(');
    for value in 1..=count {
        if value > 1 {
            list.push(',');
        }
        list.push_str(&value.to_string());
    }
    list.push(')');
    Ok(list)
}

/// Build the full `SELECT ... IN (1,...,count)` statement
pub fn build_in_query(count: i32) -> Result<String> {
    let in_list = build_in_list(count)?;
    Ok(format!("{IN_QUERY_PREFIX}{in_list}"))
}

// Digits plus one separator per value, plus the parentheses, capped
fn initial_capacity(count: i32) -> usize {
    let digits = count.to_string().len();
    usize::try_from(count)
        .unwrap_or(0)
        .saturating_mul(digits + 1)
        .saturating_add(2)
        .min(MAX_PREALLOCATION)
}
