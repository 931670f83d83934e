//! Parsing of displayed `a x b = c` expressions.
//!
//! Answer feedback is driven by re-evaluating the text the player saw, not
//! by the `is_correct` flag stored alongside it.

/// Split an expression on runs of whitespace, `x` and `=` and read the three
/// numbers. Returns `None` unless exactly three integers are found.
pub fn parse_expression(expression: &str) -> Option<(i64, i64, i64)> {
    let mut numbers = expression
        .split(|c: char| c.is_whitespace() || c == 'x' || c == '=')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>());

    let first = numbers.next()?.ok()?;
    let second = numbers.next()?.ok()?;
    let result = numbers.next()?.ok()?;
    if numbers.next().is_some() {
        return None;
    }
    Some((first, second, result))
}

/// Whether the displayed numbers multiply out. Unparsable text never holds.
pub fn expression_holds(expression: &str) -> bool {
    parse_expression(expression).is_some_and(|(a, b, c)| a * b == c)
}
