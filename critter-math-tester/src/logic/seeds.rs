use anyhow::{Context, Result, bail};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const DEFAULT_SEED: u64 = 1337;
const MAX_RANGE_LEN: u64 = 10_000;

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<start>\d+)\.\.(?P<inclusive>=)?(?P<end>\d+)$")
            .unwrap_or_else(|err| unreachable!("seed range pattern: {err}"))
    })
}

/// Resolve CLI seed tokens into a deduplicated seed list.
///
/// Accepts literal integers (negative values use their magnitude) and
/// `a..b` / `a..=b` ranges. An empty list falls back to 1337.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        for seed in expand_token(token)? {
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

fn expand_token(token: &str) -> Result<Vec<u64>> {
    if let Ok(value) = token.parse::<u64>() {
        return Ok(vec![value]);
    }
    if let Ok(value) = token.parse::<i64>() {
        return Ok(vec![value.unsigned_abs()]);
    }

    let Some(caps) = range_pattern().captures(token) else {
        bail!("Unrecognized seed token: {token}");
    };
    let start: u64 = caps["start"]
        .parse()
        .with_context(|| format!("range start in {token}"))?;
    let mut end: u64 = caps["end"]
        .parse()
        .with_context(|| format!("range end in {token}"))?;
    if caps.name("inclusive").is_some() {
        end = end.saturating_add(1);
    }
    if end <= start {
        bail!("Empty seed range: {token}");
    }
    if end - start > MAX_RANGE_LEN {
        bail!("Seed range {token} is longer than {MAX_RANGE_LEN} seeds");
    }
    Ok((start..end).collect())
}
