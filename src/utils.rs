use std::fmt;

/// Parses a single per-edge hitsound override. Anything that isn't a plain unsigned integer counts as `0`.
#[must_use]
pub fn parse_override_token(token: &str) -> u32 {
    let token = token.trim();
    if token.is_empty() {
        return 0;
    }

    token.parse().unwrap_or_else(|_| {
        log::warn!("Ignoring invalid edge hitsound {token:?}");
        0
    })
}

/// Parses a `sep`-separated list of per-edge hitsound overrides. An empty line is an empty list.
#[must_use]
pub fn parse_override_list(line: &str, sep: char) -> Vec<u32> {
    if line.is_empty() {
        return Vec::new();
    }

    line.split(sep).map(parse_override_token).collect()
}

/// Displays a float the way a decimal interval is expected in timing points:
/// always with a fractional part (`500.0`, `-50.0`, `333.3333333333333`).
pub struct DecimalView(pub f64);

impl fmt::Display for DecimalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_override_list, parse_override_token, DecimalView};

    #[test]
    fn override_tokens() {
        assert_eq!(parse_override_token("8"), 8);
        assert_eq!(parse_override_token(" 4 "), 4);
        assert_eq!(parse_override_token(""), 0);
        assert_eq!(parse_override_token("clap"), 0);
        assert_eq!(parse_override_token("-2"), 0);
        assert_eq!(parse_override_token("2.0"), 0);
    }

    #[test]
    fn override_lists() {
        assert_eq!(parse_override_list("", '|'), Vec::<u32>::new());
        assert_eq!(parse_override_list("8|4", '|'), vec![8, 4]);
        assert_eq!(parse_override_list("8||x|2", '|'), vec![8, 0, 0, 2]);
    }

    #[test]
    fn decimals() {
        assert_eq!(DecimalView(500.).to_string(), "500.0");
        assert_eq!(DecimalView(-50.).to_string(), "-50.0");
        assert_eq!(DecimalView(60000. / 180.).to_string(), "333.3333333333333");
        assert_eq!(DecimalView(-100. / 1.5).to_string(), "-66.66666666666667");
    }
}
